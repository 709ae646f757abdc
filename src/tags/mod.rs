//! Tag overlay - numbered markers over interactive page elements

pub mod dom;
pub mod overlay;
pub mod scanner;
pub mod watcher;

pub use dom::{Document, DomEvent, Element, NodeId, AVA_ATTRIBUTE};
pub use overlay::{Activation, TagOverlay};
pub use scanner::{TagScanner, ValidTag};
pub use watcher::{should_recompute, Mutation, ScrollStopDebouncer};
