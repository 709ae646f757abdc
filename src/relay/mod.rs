//! Background relay: privileged tab, history and search operations
//!
//! The content side never calls the browser host directly. It sends a
//! [`Message`] through a [`RelayClient`] and the relay task performs the
//! operation against a [`BrowserHost`].

pub mod activity;
pub mod background;
pub mod channel;
pub mod host;
pub mod message;
pub mod simulated;

pub use activity::{ActivityHub, ActivityPort};
pub use background::{BackgroundRelay, RelayReply};
pub use channel::{spawn_relay, RelayClient, RelayRequest};
pub use host::BrowserHost;
pub use message::{website_url, Disposition, Message, RelayIntent, SearchRequest};
pub use simulated::{BrowserSnapshot, SimTab, SimulatedBrowser};
