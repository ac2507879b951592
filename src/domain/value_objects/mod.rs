pub mod lead_filter;
pub mod subscription;

pub use lead_filter::LeadFilter;
pub use subscription::SubscriptionSet;
