use crate::domain::entities::user::UserRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Proposal => "Proposal",
            LeadStatus::Negotiation => "Negotiation",
            LeadStatus::Won => "Won",
            LeadStatus::Lost => "Lost",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "New" => Some(LeadStatus::New),
            "Contacted" => Some(LeadStatus::Contacted),
            "Qualified" => Some(LeadStatus::Qualified),
            "Proposal" => Some(LeadStatus::Proposal),
            "Negotiation" => Some(LeadStatus::Negotiation),
            "Won" => Some(LeadStatus::Won),
            "Lost" => Some(LeadStatus::Lost),
            _ => None,
        }
    }
}

/// A server-owned lead record mirrored locally. Identity is the
/// server-assigned integer id; merges always match on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub status: LeadStatus,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub estimated_value: f64,
    #[serde(default)]
    pub assigned_to: Option<UserRef>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-proposed lead values for create/update actions. The server's
/// canonical record always wins over these on confirmation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDraft {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub status: Option<LeadStatus>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub estimated_value: Option<f64>,
    #[serde(default)]
    pub assigned_to_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}
