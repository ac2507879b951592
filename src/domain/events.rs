use crate::domain::entities::{Activity, Lead};
use serde_json::Value;
use thiserror::Error;

/// A push notification as handed over by the transport: a named topic plus
/// an already-parsed JSON payload. Validation happens in [`PushEvent::decode`]
/// before anything reaches the reconciler.
#[derive(Debug, Clone)]
pub struct RawPushEvent {
    pub topic: String,
    pub payload: Value,
}

impl RawPushEvent {
    pub fn new<T: Into<String>>(topic: T, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }
}

/// Messages the client sends back over the push channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    Subscribe(i64),
    Unsubscribe(i64),
}

impl OutboundMessage {
    pub fn topic(&self) -> &'static str {
        match self {
            OutboundMessage::Subscribe(_) => "lead:subscribe",
            OutboundMessage::Unsubscribe(_) => "lead:unsubscribe",
        }
    }

    pub fn lead_id(&self) -> i64 {
        match self {
            OutboundMessage::Subscribe(id) | OutboundMessage::Unsubscribe(id) => *id,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unknown event topic: {0}")]
    UnknownTopic(String),

    #[error("Event {topic} is missing field `{field}`")]
    MissingField { topic: String, field: &'static str },

    #[error("Event {topic} payload did not parse: {source}")]
    BadPayload {
        topic: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Closed union of the push events the engine consumes. Record events carry
/// the full updated record, never a diff.
#[derive(Debug, Clone)]
pub enum PushEvent {
    LeadCreated(Lead),
    LeadUpdated(Lead),
    LeadDeleted { id: i64 },
    ActivityCreated(Activity),
}

impl PushEvent {
    pub fn decode(raw: &RawPushEvent) -> Result<Self, DecodeError> {
        match raw.topic.as_str() {
            "lead:created" => Ok(PushEvent::LeadCreated(decode_lead(raw)?)),
            "lead:updated" => Ok(PushEvent::LeadUpdated(decode_lead(raw)?)),
            "lead:deleted" => Ok(PushEvent::LeadDeleted {
                id: decode_deleted_id(raw)?,
            }),
            "activity:created" => {
                let value = raw.payload.get("activity").ok_or(DecodeError::MissingField {
                    topic: raw.topic.clone(),
                    field: "activity",
                })?;
                let activity = serde_json::from_value(value.clone()).map_err(|source| {
                    DecodeError::BadPayload {
                        topic: raw.topic.clone(),
                        source,
                    }
                })?;
                Ok(PushEvent::ActivityCreated(activity))
            }
            other => Err(DecodeError::UnknownTopic(other.to_string())),
        }
    }

    pub fn topic(&self) -> &'static str {
        match self {
            PushEvent::LeadCreated(_) => "lead:created",
            PushEvent::LeadUpdated(_) => "lead:updated",
            PushEvent::LeadDeleted { .. } => "lead:deleted",
            PushEvent::ActivityCreated(_) => "activity:created",
        }
    }
}

fn decode_lead(raw: &RawPushEvent) -> Result<Lead, DecodeError> {
    let value = raw.payload.get("lead").ok_or(DecodeError::MissingField {
        topic: raw.topic.clone(),
        field: "lead",
    })?;
    serde_json::from_value(value.clone()).map_err(|source| DecodeError::BadPayload {
        topic: raw.topic.clone(),
        source,
    })
}

// Deleted events carry either a bare id or a wrapped lead; accept both.
fn decode_deleted_id(raw: &RawPushEvent) -> Result<i64, DecodeError> {
    let id = raw
        .payload
        .get("id")
        .or_else(|| raw.payload.get("lead").and_then(|lead| lead.get("id")))
        .and_then(Value::as_i64);
    id.ok_or(DecodeError::MissingField {
        topic: raw.topic.clone(),
        field: "id",
    })
}
