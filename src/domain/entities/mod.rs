pub mod activity;
pub mod dashboard;
pub mod lead;
pub mod page;
pub mod user;

pub use activity::{Activity, ActivityDraft, ActivityKind};
pub use dashboard::{AggregateSnapshot, DashboardStats, MonthlyCount, PerformanceRow, SourceCount};
pub use lead::{Lead, LeadDraft, LeadStatus};
pub use page::Page;
pub use user::UserRef;
