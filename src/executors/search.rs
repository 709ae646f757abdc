//! Search query extraction and the search executor

use crate::command::Command;
use crate::core::error::Result;
use crate::executors::{Effect, Execution, ExecutionContext, Outcome};
use crate::lexicon::{Adjective, NounCategory};
use crate::relay::{Disposition, Message};
use regex::Regex;
use std::sync::{Arc, OnceLock};

const SEARCH_PATTERN: &str = r"(?:look up|find out|search up|search for)\s+(?P<query>.+?)(?:\s+in\s+(?:an?\s+|the\s+)?(?P<place>another|new|this|current)(?:\s+(?P<target>tab|window|page))?)?\s*$";

/// Slots pulled out of a search sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSlots {
    pub query: String,
    /// Disposition named by a trailing "in a new tab" style clause
    pub location: Option<Disposition>,
}

/// Pulls a search query out of a sentence
pub trait QueryExtractor: Send + Sync {
    fn extract(&self, sentence: &str) -> Option<SearchSlots>;
}

/// Trigger-phrase extractor: "search for X", "look up X in a new tab"
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexQueryExtractor;

fn search_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(SEARCH_PATTERN).ok())
        .as_ref()
}

impl QueryExtractor for RegexQueryExtractor {
    fn extract(&self, sentence: &str) -> Option<SearchSlots> {
        let sentence = sentence.to_lowercase();
        let caps = search_pattern()?.captures(&sentence)?;

        let query = caps.name("query")?.as_str().trim().to_string();
        if query.is_empty() {
            return None;
        }

        let location = caps.name("place").map(|place| {
            let target = caps.name("target").map(|t| t.as_str());
            match (place.as_str(), target) {
                ("this" | "current", _) => Disposition::CurrentTab,
                (_, Some("window")) => Disposition::NewWindow,
                _ => Disposition::NewTab,
            }
        });

        Some(SearchSlots { query, location })
    }
}

/// Disposition requested through noun adjectives ("new window", "current tab")
fn disposition_from_nouns(command: &Command) -> Option<Disposition> {
    command
        .nouns
        .iter()
        .filter(|n| n.is(NounCategory::Browser))
        .find_map(|n| {
            if n.has_adjective(Adjective::New) {
                Some(if n.noun.value == "window" {
                    Disposition::NewWindow
                } else {
                    Disposition::NewTab
                })
            } else if n.has_adjective(Adjective::Current) {
                Some(Disposition::CurrentTab)
            } else {
                None
            }
        })
}

pub struct SearchExecutor {
    extractor: Arc<dyn QueryExtractor>,
}

impl SearchExecutor {
    pub fn new(extractor: Arc<dyn QueryExtractor>) -> Self {
        Self { extractor }
    }
}

impl Default for SearchExecutor {
    fn default() -> Self {
        Self::new(Arc::new(RegexQueryExtractor))
    }
}

impl Execution for SearchExecutor {
    fn name(&self) -> &'static str {
        "search"
    }

    fn execute(&self, command: &Command, _ctx: &mut ExecutionContext<'_>) -> Result<Outcome> {
        let Some(slots) = self.extractor.extract(&command.command) else {
            return Ok(Outcome::NotApplicable);
        };

        let disposition = disposition_from_nouns(command)
            .or(slots.location)
            .unwrap_or_default();
        tracing::info!("Searching for {:?} ({:?})", slots.query, disposition);

        Ok(Outcome::effect(Effect::Relay(Message::search(
            disposition,
            slots.query,
        ))))
    }
}
