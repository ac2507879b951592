use crate::domain::events::{OutboundMessage, RawPushEvent};
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Lifecycle and data notifications emitted by a live push connection.
/// Reconnection is the connection's own concern; the engine only learns
/// that it happened so it can replay subscriptions.
#[derive(Debug)]
pub enum TransportEvent {
    Connected,
    Reconnected,
    Disconnected { reason: String },
    Push(RawPushEvent),
}

/// Outbound half of a live connection. Shared with the session pump task,
/// which replays subscriptions on reconnect.
#[async_trait]
pub trait PushSink: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<(), AppError>;

    async fn close(&self);
}

/// One established push connection: a sink for outbound messages and a
/// stream of transport events. Framing and handshake live behind this.
pub struct PushConnection {
    pub sink: Arc<dyn PushSink>,
    pub events: mpsc::UnboundedReceiver<TransportEvent>,
}

/// Factory for credential-bound push connections.
#[async_trait]
pub trait PushConnector: Send + Sync {
    async fn connect(&self, token: &str) -> Result<PushConnection, AppError>;
}
