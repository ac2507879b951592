use crate::application::ports::{PushConnector, PushSink, TransportEvent};
use crate::domain::events::{OutboundMessage, RawPushEvent};
use crate::domain::value_objects::SubscriptionSet;
use crate::shared::error::AppError;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

struct SessionHandle {
    sink: Arc<dyn PushSink>,
    pump: JoinHandle<()>,
}

/// Owns the single live push connection for the session's credential.
///
/// Inbound push events are forwarded over an internal channel; the consumer
/// (the reconciler loop) takes the receiver once via [`take_push_events`].
/// The server holds no subscription state across connection loss, so every
/// registered lead subscription is replayed after a (re)connect.
///
/// Absence of a connection is not an error: subscriptions are still
/// recorded and the engine degrades to REST-only fetches.
///
/// [`take_push_events`]: TransportSession::take_push_events
pub struct TransportSession {
    connector: Arc<dyn PushConnector>,
    handle: RwLock<Option<SessionHandle>>,
    subscriptions: Arc<RwLock<SubscriptionSet>>,
    push_tx: mpsc::UnboundedSender<RawPushEvent>,
    push_rx: RwLock<Option<mpsc::UnboundedReceiver<RawPushEvent>>>,
}

impl TransportSession {
    pub fn new(connector: Arc<dyn PushConnector>) -> Self {
        let (push_tx, push_rx) = mpsc::unbounded_channel();
        Self {
            connector,
            handle: RwLock::new(None),
            subscriptions: Arc::new(RwLock::new(SubscriptionSet::new())),
            push_tx,
            push_rx: RwLock::new(Some(push_rx)),
        }
    }

    /// One-shot receiver of raw push events, consumed by the reconciler loop.
    pub async fn take_push_events(&self) -> Option<mpsc::UnboundedReceiver<RawPushEvent>> {
        self.push_rx.write().await.take()
    }

    /// Establishes the push connection for `token`, tearing down any prior
    /// handle first. Without a credential this is a no-op and the engine
    /// stays REST-only. Returns whether a connection is now live.
    pub async fn connect(&self, token: Option<&str>) -> Result<bool, AppError> {
        self.disconnect().await;

        let Some(token) = token else {
            warn!("No token provided for push connection; staying REST-only");
            return Ok(false);
        };

        let connection = match self.connector.connect(token).await {
            Ok(connection) => connection,
            Err(err) => {
                error!("Push connection failed, degrading to REST-only: {}", err);
                return Err(AppError::Transport(err.to_string()));
            }
        };

        let sink = connection.sink.clone();
        replay_subscriptions(&sink, &self.subscriptions).await;

        let pump = spawn_pump(
            connection.events,
            sink.clone(),
            self.subscriptions.clone(),
            self.push_tx.clone(),
        );

        *self.handle.write().await = Some(SessionHandle { sink, pump });
        info!("Push connection established");
        Ok(true)
    }

    /// Tears down the live connection, if any. Registered subscriptions are
    /// kept so a later connect replays them.
    pub async fn disconnect(&self) {
        if let Some(handle) = self.handle.write().await.take() {
            handle.pump.abort();
            handle.sink.close().await;
            info!("Push connection closed");
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.handle.read().await.is_some()
    }

    /// Registers interest in a lead. Sent immediately when connected,
    /// otherwise recorded for replay. Send failures only degrade push
    /// freshness, so they are logged rather than returned.
    pub async fn subscribe_lead(&self, id: i64) {
        let newly_added = self.subscriptions.write().await.add(id);
        if !newly_added {
            debug!(lead_id = id, "Subscription already registered");
            return;
        }
        self.send_if_connected(OutboundMessage::Subscribe(id)).await;
    }

    /// Releases interest in a lead. Must be called when the viewing context
    /// ends so server-side registrations do not leak.
    pub async fn unsubscribe_lead(&self, id: i64) {
        let was_registered = self.subscriptions.write().await.remove(id);
        if !was_registered {
            return;
        }
        self.send_if_connected(OutboundMessage::Unsubscribe(id)).await;
    }

    pub async fn active_subscriptions(&self) -> Vec<i64> {
        self.subscriptions.read().await.replay_ids()
    }

    async fn send_if_connected(&self, message: OutboundMessage) {
        let sink = {
            let handle = self.handle.read().await;
            handle.as_ref().map(|h| h.sink.clone())
        };
        match sink {
            Some(sink) => {
                if let Err(err) = sink.send(message.clone()).await {
                    warn!(
                        topic = message.topic(),
                        lead_id = message.lead_id(),
                        "Failed to send push message: {}",
                        err
                    );
                }
            }
            None => debug!(
                topic = message.topic(),
                lead_id = message.lead_id(),
                "Not connected; subscription recorded for replay"
            ),
        }
    }
}

fn spawn_pump(
    mut events: mpsc::UnboundedReceiver<TransportEvent>,
    sink: Arc<dyn PushSink>,
    subscriptions: Arc<RwLock<SubscriptionSet>>,
    push_tx: mpsc::UnboundedSender<RawPushEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                TransportEvent::Connected => {
                    debug!("Push transport reported connected");
                }
                TransportEvent::Reconnected => {
                    info!("Push transport reconnected; replaying subscriptions");
                    replay_subscriptions(&sink, &subscriptions).await;
                }
                TransportEvent::Disconnected { reason } => {
                    warn!("Push transport disconnected: {}", reason);
                }
                TransportEvent::Push(raw) => {
                    if push_tx.send(raw).is_err() {
                        debug!("Push event receiver dropped; stopping pump");
                        break;
                    }
                }
            }
        }
    })
}

async fn replay_subscriptions(sink: &Arc<dyn PushSink>, subscriptions: &RwLock<SubscriptionSet>) {
    let ids = subscriptions.read().await.replay_ids();
    for id in ids {
        if let Err(err) = sink.send(OutboundMessage::Subscribe(id)).await {
            warn!(lead_id = id, "Failed to replay subscription: {}", err);
        }
    }
}
