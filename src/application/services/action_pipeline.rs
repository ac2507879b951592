use crate::application::ports::RestClient;
use crate::application::services::dashboard_cache::DashboardCache;
use crate::application::services::lead_detail_cache::LeadDetailCache;
use crate::application::services::lead_query_cache::LeadQueryCache;
use crate::domain::entities::{Activity, ActivityDraft, Lead, LeadDraft};
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub enum LeadAction {
    Create(LeadDraft),
    Update { id: i64, draft: LeadDraft },
    Delete { id: i64 },
}

#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Created(Lead),
    Updated(Lead),
    Deleted(i64),
}

/// Outbound mutations. The committed cache change happens only on server
/// confirmation, using the server's canonical record (which may differ
/// from the proposed values). A rejection leaves every cache untouched;
/// retries are the caller's policy, not the pipeline's.
///
/// A push event for the same write may arrive later; the identity-guarded
/// cache contracts make that second application a no-op.
pub struct ActionPipeline {
    rest: Arc<dyn RestClient>,
    query: Arc<LeadQueryCache>,
    detail: Arc<LeadDetailCache>,
    dashboard: Arc<DashboardCache>,
}

impl ActionPipeline {
    pub fn new(
        rest: Arc<dyn RestClient>,
        query: Arc<LeadQueryCache>,
        detail: Arc<LeadDetailCache>,
        dashboard: Arc<DashboardCache>,
    ) -> Self {
        Self {
            rest,
            query,
            detail,
            dashboard,
        }
    }

    pub async fn submit(&self, action: LeadAction) -> Result<ActionOutcome, AppError> {
        match action {
            LeadAction::Create(draft) => {
                let lead = self.rest.create_lead(&draft).await?;
                info!(lead_id = lead.id, "Lead create confirmed");
                self.query.apply_local_created(lead.clone()).await;
                self.dashboard.mark_stale().await;
                Ok(ActionOutcome::Created(lead))
            }
            LeadAction::Update { id, draft } => {
                let lead = self.rest.update_lead(id, &draft).await?;
                info!(lead_id = lead.id, "Lead update confirmed");
                self.query.apply_updated(&lead).await;
                self.detail.apply_record_updated(lead.clone()).await;
                self.dashboard.mark_stale().await;
                Ok(ActionOutcome::Updated(lead))
            }
            LeadAction::Delete { id } => {
                self.rest.delete_lead(id).await?;
                info!(lead_id = id, "Lead delete confirmed");
                self.query.apply_local_deleted(id).await;
                self.detail.apply_record_deleted(id).await;
                self.dashboard.mark_stale().await;
                Ok(ActionOutcome::Deleted(id))
            }
        }
    }

    /// Creates an activity and prepends the confirmed record to the focused
    /// timeline. The later `activity:created` push duplicate is absorbed by
    /// the identity check.
    pub async fn submit_activity(&self, draft: ActivityDraft) -> Result<Activity, AppError> {
        let activity = self.rest.create_activity(&draft).await?;
        info!(
            activity_id = activity.id,
            lead_id = activity.lead_id,
            "Activity create confirmed"
        );
        self.detail.apply_activity_created(activity.clone()).await;
        Ok(activity)
    }
}
