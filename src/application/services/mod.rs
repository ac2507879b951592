pub mod action_pipeline;
pub mod dashboard_cache;
pub mod event_reconciler;
pub mod lead_detail_cache;
pub mod lead_query_cache;
pub mod transport_session;

pub use action_pipeline::{ActionOutcome, ActionPipeline, LeadAction};
pub use dashboard_cache::DashboardCache;
pub use event_reconciler::EventReconciler;
pub use lead_detail_cache::{FocusState, LeadDetailCache};
pub use lead_query_cache::LeadQueryCache;
pub use transport_session::TransportSession;
