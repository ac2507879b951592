use crate::domain::entities::activity::Activity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Server-computed dashboard rollup. Replaced wholesale on every refresh;
/// the client never patches these incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_leads: u64,
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub leads_by_status: HashMap<String, u64>,
    #[serde(default)]
    pub leads_by_source: Vec<SourceCount>,
    #[serde(default)]
    pub monthly_trend: Vec<MonthlyCount>,
    #[serde(default)]
    pub recent_activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCount {
    pub source: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    pub month: String,
    pub count: u64,
}

/// Per-user performance rollup, only meaningful for manager roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRow {
    pub user_id: i64,
    pub name: String,
    pub total_leads: u64,
    pub won_leads: u64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub total_value: f64,
}

/// Everything the dashboard view reads, captured in one refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub stats: Option<DashboardStats>,
    pub performance: Vec<PerformanceRow>,
}
