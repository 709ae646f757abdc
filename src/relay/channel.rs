//! Request/response transport between the content side and the relay task

use crate::core::config::AssistantConfig;
use crate::core::error::{AvaError, Result};
use crate::core::types::TabId;
use crate::relay::activity::ActivityPort;
use crate::relay::background::{BackgroundRelay, RelayReply};
use crate::relay::host::BrowserHost;
use crate::relay::message::Message;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// One request queued for the relay task
#[derive(Debug)]
pub enum RelayRequest {
    Message {
        id: Uuid,
        sender: Option<TabId>,
        message: Message,
        reply: oneshot::Sender<RelayReply>,
    },
    Connect {
        tab: TabId,
        reply: oneshot::Sender<ActivityPort>,
    },
}

/// Content-side handle to the relay
#[derive(Debug, Clone)]
pub struct RelayClient {
    tx: mpsc::Sender<RelayRequest>,
    timeout: Duration,
    sender: Option<TabId>,
}

impl RelayClient {
    pub fn new(tx: mpsc::Sender<RelayRequest>, timeout: Duration, sender: Option<TabId>) -> Self {
        Self {
            tx,
            timeout,
            sender,
        }
    }

    /// Same channel, reporting a different sender tab
    pub fn for_tab(&self, sender: Option<TabId>) -> Self {
        Self {
            sender,
            ..self.clone()
        }
    }

    pub fn sender(&self) -> Option<TabId> {
        self.sender
    }

    /// Send a message and wait for the relay's reply
    ///
    /// The timeout covers both queueing and the privileged call itself.
    pub async fn send(&self, message: Message) -> Result<()> {
        let id = Uuid::new_v4();
        tracing::debug!("Relay request {} ({})", id, message.intent.as_str());

        let reply = self
            .round_trip(|reply| RelayRequest::Message {
                id,
                sender: self.sender,
                message,
                reply,
            })
            .await?;

        match reply {
            RelayReply::Done => {
                tracing::debug!("Relay request {} done", id);
                Ok(())
            }
            RelayReply::Apology(text) => {
                tracing::warn!("Relay request {} rejected: {}", id, text);
                Err(AvaError::RelayRejected(text))
            }
        }
    }

    /// Open the activity port for `tab`
    pub async fn connect(&self, tab: TabId) -> Result<ActivityPort> {
        self.round_trip(|reply| RelayRequest::Connect { tab, reply })
            .await
    }

    async fn round_trip<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> RelayRequest,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = build(reply_tx);

        let exchange = async {
            self.tx
                .send(request)
                .await
                .map_err(|_| AvaError::RelayClosed)?;
            reply_rx.await.map_err(|_| AvaError::RelayClosed)
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(AvaError::RelayTimeout(self.timeout.as_millis() as u64)),
        }
    }
}

/// Spawn the relay task; it runs until every client is dropped
pub fn spawn_relay<H>(relay: BackgroundRelay<H>, config: &AssistantConfig) -> (RelayClient, JoinHandle<()>)
where
    H: BrowserHost + 'static,
{
    let (tx, rx) = mpsc::channel(config.relay_queue_capacity);
    let handle = tokio::spawn(run_relay(relay, rx));
    let client = RelayClient::new(
        tx,
        Duration::from_millis(config.relay_timeout_ms),
        config.sender_tab.map(TabId),
    );
    (client, handle)
}

async fn run_relay<H: BrowserHost>(mut relay: BackgroundRelay<H>, mut rx: mpsc::Receiver<RelayRequest>) {
    relay.publish_activation().await;
    tracing::info!("Relay started");

    while let Some(request) = rx.recv().await {
        match request {
            RelayRequest::Message {
                id,
                sender,
                message,
                reply,
            } => {
                let outcome = relay.handle(&message, sender).await;
                if reply.send(outcome).is_err() {
                    tracing::debug!("Relay request {} abandoned by its sender", id);
                }
            }
            RelayRequest::Connect { tab, reply } => {
                let port = relay.activity_mut().connect(tab);
                let _ = reply.send(port);
            }
        }
    }

    tracing::info!("Relay stopped");
}
