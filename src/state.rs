use crate::application::ports::{PushConnector, RestClient};
use crate::application::services::{
    ActionPipeline, DashboardCache, EventReconciler, LeadDetailCache, LeadQueryCache,
    TransportSession,
};
use crate::shared::config::AppConfig;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Wires the sync engine together: one transport session, the three caches,
/// the reconciler and the action pipeline. Ports are injected so the engine
/// never touches ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Arc<TransportSession>,
    pub leads: Arc<LeadQueryCache>,
    pub detail: Arc<LeadDetailCache>,
    pub dashboard: Arc<DashboardCache>,
    pub reconciler: Arc<EventReconciler>,
    pub actions: Arc<ActionPipeline>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        rest: Arc<dyn RestClient>,
        connector: Arc<dyn PushConnector>,
    ) -> anyhow::Result<Self> {
        config
            .validate()
            .map_err(|msg| anyhow::anyhow!("Invalid configuration: {msg}"))?;

        let session = Arc::new(TransportSession::new(connector));
        let leads = Arc::new(LeadQueryCache::new(
            rest.clone(),
            config.lists.lead_page_limit,
        ));
        let detail = Arc::new(LeadDetailCache::new(rest.clone(), session.clone()));
        let dashboard = Arc::new(DashboardCache::new(rest.clone()));
        let reconciler = Arc::new(EventReconciler::new(
            leads.clone(),
            detail.clone(),
            dashboard.clone(),
        ));
        let actions = Arc::new(ActionPipeline::new(
            rest,
            leads.clone(),
            detail.clone(),
            dashboard.clone(),
        ));

        Ok(Self {
            config,
            session,
            leads,
            detail,
            dashboard,
            reconciler,
            actions,
        })
    }

    /// Starts the reconciliation loop: push events are applied strictly one
    /// at a time in delivery order, so two reconciliations never overlap.
    /// Returns None if the loop was already started.
    pub async fn spawn_reconciler(&self) -> Option<JoinHandle<()>> {
        let mut events = self.session.take_push_events().await?;
        let reconciler = self.reconciler.clone();
        Some(tokio::spawn(async move {
            while let Some(raw) = events.recv().await {
                reconciler.handle_raw(raw).await;
            }
        }))
    }
}
