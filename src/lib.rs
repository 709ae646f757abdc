//! Ava - voice-controlled browser assistant core
//!
//! Turns recognizer segments into typed commands and dispatches them through
//! domain executor chains to the page, the tag overlay and the background relay.

pub mod assistant;
pub mod command;
pub mod core;
pub mod executors;
pub mod lexicon;
pub mod page;
pub mod relay;
pub mod router;
pub mod tags;
pub mod ui;
