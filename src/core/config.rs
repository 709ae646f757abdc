//! Assistant configuration with documented constants
//!
//! Every tunable the pipeline reads lives here, grouped by subsystem.
//! Values load from TOML; missing keys fall back to the defaults below.

use crate::core::error::{AvaError, Result};
use crate::lexicon::MatchMode;
use serde::Deserialize;
use std::path::Path;

/// Configuration for the command pipeline, relay and overlay
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    // === LEXICON ===
    /// How surface words are tested against alias strings
    ///
    /// `substring` reproduces the raw `contains` test, which lets short
    /// fragments such as "me" or "to" hit verb aliases. `tokenized` requires
    /// whole alias words.
    pub lexicon_matching: MatchMode,

    // === RELAY ===
    /// How long the content side waits for a relay reply (milliseconds)
    ///
    /// Privileged calls are local to the browser, so anything beyond a couple
    /// of seconds means the background context is gone.
    pub relay_timeout_ms: u64,

    /// Number of relay requests that may queue before senders wait
    pub relay_queue_capacity: usize,

    // === TAG OVERLAY ===
    /// Quiet period after the last scroll event before tags are re-shown
    ///
    /// At 150ms a smooth scroll triggered by the assistant itself settles
    /// before the overlay recomputes.
    pub scroll_stop_debounce_ms: u64,

    /// Badge width in CSS pixels
    pub badge_width: f64,

    /// Badge height in CSS pixels
    pub badge_height: f64,

    // === TRANSCRIPT ===
    /// Maximum dialogue lines kept; oldest lines drop first
    pub max_transcript_lines: usize,

    // === SESSION ===
    /// Seed for the corner picker; entropy when absent
    pub seed: Option<u64>,

    /// Tab the content side runs in, reported to the relay as the sender
    pub sender_tab: Option<u32>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            lexicon_matching: MatchMode::Tokenized,

            relay_timeout_ms: 2000,
            relay_queue_capacity: 16,

            scroll_stop_debounce_ms: 150,
            badge_width: 20.0,
            badge_height: 16.0,

            max_transcript_lines: 50,

            seed: None,
            sender_tab: Some(1),
        }
    }
}

impl AssistantConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: AssistantConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.relay_timeout_ms == 0 {
            return Err(AvaError::Config("relay_timeout_ms must be positive".into()));
        }

        if self.relay_queue_capacity == 0 {
            return Err(AvaError::Config(
                "relay_queue_capacity must be at least 1".into(),
            ));
        }

        if self.badge_width <= 0.0 || self.badge_height <= 0.0 {
            return Err(AvaError::Config(format!(
                "badge size must be positive, got {}x{}",
                self.badge_width, self.badge_height
            )));
        }

        if self.max_transcript_lines == 0 {
            return Err(AvaError::Config(
                "max_transcript_lines must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
