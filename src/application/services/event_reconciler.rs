use crate::application::services::dashboard_cache::DashboardCache;
use crate::application::services::lead_detail_cache::LeadDetailCache;
use crate::application::services::lead_query_cache::LeadQueryCache;
use crate::domain::events::{PushEvent, RawPushEvent};
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes each inbound push event to the cache owning the affected record.
///
/// Every handler it calls is identity-guarded, so redelivered or replayed
/// events are no-ops the second time. Errors while reconciling one event
/// are contained inside the caches and never stop the loop.
pub struct EventReconciler {
    query: Arc<LeadQueryCache>,
    detail: Arc<LeadDetailCache>,
    dashboard: Arc<DashboardCache>,
}

impl EventReconciler {
    pub fn new(
        query: Arc<LeadQueryCache>,
        detail: Arc<LeadDetailCache>,
        dashboard: Arc<DashboardCache>,
    ) -> Self {
        Self {
            query,
            detail,
            dashboard,
        }
    }

    /// Decodes and applies one raw event. Malformed payloads (missing
    /// identity, unknown topic) are dropped and logged, never propagated.
    pub async fn handle_raw(&self, raw: RawPushEvent) {
        match PushEvent::decode(&raw) {
            Ok(event) => self.apply(event).await,
            Err(err) => {
                warn!(topic = %raw.topic, "Dropping malformed push event: {}", err);
            }
        }
    }

    pub async fn apply(&self, event: PushEvent) {
        debug!(topic = event.topic(), "Reconciling push event");
        match event {
            PushEvent::LeadCreated(lead) => {
                self.query.apply_created(&lead).await;
                self.dashboard.mark_stale().await;
            }
            PushEvent::LeadUpdated(lead) => {
                self.query.apply_updated(&lead).await;
                self.detail.apply_record_updated(lead).await;
                self.dashboard.mark_stale().await;
            }
            PushEvent::LeadDeleted { id } => {
                self.detail.apply_record_deleted(id).await;
                self.query.apply_deleted(id).await;
                self.dashboard.mark_stale().await;
            }
            PushEvent::ActivityCreated(activity) => {
                self.detail.apply_activity_created(activity).await;
            }
        }
    }
}
