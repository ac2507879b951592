use crate::domain::entities::{
    Activity, ActivityDraft, DashboardStats, Lead, LeadDraft, Page, PerformanceRow,
};
use crate::domain::value_objects::LeadFilter;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// REST boundary of the engine. Implementations own transport details
/// (HTTP client, auth headers, retries); the engine only sees parsed
/// records or typed errors. Write endpoints return the canonical
/// post-write record.
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn list_leads(&self, filter: &LeadFilter) -> Result<Page<Lead>, AppError>;

    async fn get_lead(&self, id: i64) -> Result<Lead, AppError>;

    async fn create_lead(&self, draft: &LeadDraft) -> Result<Lead, AppError>;

    async fn update_lead(&self, id: i64, draft: &LeadDraft) -> Result<Lead, AppError>;

    async fn delete_lead(&self, id: i64) -> Result<(), AppError>;

    /// Activities for one lead, newest first.
    async fn list_activities(&self, lead_id: i64) -> Result<Vec<Activity>, AppError>;

    async fn create_activity(&self, draft: &ActivityDraft) -> Result<Activity, AppError>;

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError>;

    async fn team_performance(&self) -> Result<Vec<PerformanceRow>, AppError>;
}
