//! Triggers for recomputing tags: DOM mutations and scroll stops

use crate::tags::dom::{Document, NodeId};
use std::time::Duration;
use tokio::time::Instant;

/// A childList/subtree change reported for `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub target: NodeId,
}

/// Whether a mutation should cause a tag recompute
///
/// Changes inside the assistant's own subtree (badges, transcript) are
/// ignored, otherwise rendering tags would retrigger itself.
pub fn should_recompute(doc: &Document, mutation: &Mutation, show_tags: bool) -> bool {
    if !show_tags {
        return false;
    }

    let scope = doc
        .get(mutation.target)
        .and_then(|e| e.parent())
        .unwrap_or(mutation.target);
    !doc.is_assistant_node(scope)
}

/// Fires once after scroll events have been quiet for the debounce period
#[derive(Debug, Clone)]
pub struct ScrollStopDebouncer {
    quiet: Duration,
    last_scroll: Option<Instant>,
}

impl ScrollStopDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_scroll: None,
        }
    }

    pub fn on_scroll(&mut self, now: Instant) {
        self.last_scroll = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.last_scroll.is_some()
    }

    /// When the scroll-stop would fire if nothing else scrolls
    pub fn deadline(&self) -> Option<Instant> {
        self.last_scroll.map(|t| t + self.quiet)
    }

    /// True exactly once per burst of scrolling, once it has gone quiet
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.last_scroll = None;
                true
            }
            _ => false,
        }
    }
}
