//! Long-lived per-tab ports announcing whether the tab is active

use crate::core::types::TabId;
use ahash::AHashMap;
use tokio::sync::mpsc;

/// Content-side end of an activity port
#[derive(Debug)]
pub struct ActivityPort {
    tab: TabId,
    rx: mpsc::UnboundedReceiver<bool>,
}

impl ActivityPort {
    pub fn tab(&self) -> TabId {
        self.tab
    }

    /// Next activity change; `None` once the relay is gone
    pub async fn recv(&mut self) -> Option<bool> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<bool> {
        self.rx.try_recv().ok()
    }
}

/// Relay-side registry of connected ports
#[derive(Debug, Default)]
pub struct ActivityHub {
    ports: AHashMap<TabId, mpsc::UnboundedSender<bool>>,
}

impl ActivityHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a port for `tab`, replacing any earlier one
    pub fn connect(&mut self, tab: TabId) -> ActivityPort {
        let (tx, rx) = mpsc::unbounded_channel();
        self.ports.insert(tab, tx);
        tracing::debug!("Activity port connected for {}", tab);
        ActivityPort { tab, rx }
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Tell `active` it is active and every other port that it is not
    pub fn on_activated(&mut self, active: TabId) {
        self.ports.retain(|tab, tx| {
            let alive = tx.send(*tab == active).is_ok();
            if !alive {
                tracing::debug!("Dropping disconnected activity port for {}", tab);
            }
            alive
        });
    }
}
