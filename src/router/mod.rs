//! Intent routing - sends each final segment to its domain's executor chain
//!
//! A segment whose words include "dictate" or "dictation" is always treated as
//! dictation, whatever intent the recognizer attached.

pub mod intent;

pub use intent::Intent;

use crate::command::{CommandConstructor, Segment};
use crate::core::error::{AvaError, Result};
use crate::executors::browser::{OpenWebsiteExecutor, RefreshExecutor, TabExecutor};
use crate::executors::page::{IndexExecutor, NavigationExecutor, ScrollExecutor};
use crate::executors::ava::{AvaMoveExecutor, ModalExecutor, TagsExecutor};
use crate::executors::search::SearchExecutor;
use crate::executors::{
    ava, browser, page, Effect, ExecutionContext, ExecutorChain, QueryExtractor,
    RegexQueryExtractor,
};
use crate::lexicon::Lexicon;
use ahash::AHashMap;
use std::sync::Arc;

const DICTATION_TRIGGERS: [&str; 2] = ["dictate", "dictation"];

/// Words following the dictation trigger, lowercased
///
/// A segment labelled DICTATION without a trigger word dictates all its words.
pub fn dictation_text(segment: &Segment) -> Result<String> {
    let words: Vec<&str> = segment
        .words
        .iter()
        .map(|w| w.value.trim())
        .filter(|v| !v.is_empty())
        .collect();

    let start = words
        .iter()
        .position(|w| is_trigger(w))
        .map_or(0, |i| i + 1);

    let text = words[start..]
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return Err(AvaError::EmptyDictation);
    }
    Ok(text)
}

fn is_trigger(word: &str) -> bool {
    DICTATION_TRIGGERS
        .iter()
        .any(|t| word.eq_ignore_ascii_case(t))
}

/// Resolve the segment's effective intent, applying the dictation override
pub fn effective_intent(segment: &Segment) -> Result<Intent> {
    if segment.words.iter().any(|w| is_trigger(w.value.trim())) {
        return Ok(Intent::Dictation);
    }
    let label = &segment.intent.intent;
    Intent::parse(label).ok_or_else(|| AvaError::UnknownIntent(label.clone()))
}

pub struct IntentRouter {
    constructor: CommandConstructor,
    chains: AHashMap<Intent, ExecutorChain>,
}

impl IntentRouter {
    pub fn new(lexicon: Lexicon) -> Self {
        Self::with_extractor(lexicon, Arc::new(RegexQueryExtractor))
    }

    pub fn with_extractor(lexicon: Lexicon, extractor: Arc<dyn QueryExtractor>) -> Self {
        let search = || SearchExecutor::new(Arc::clone(&extractor));
        let single = |intent: Intent| ExecutorChain::new(intent.as_str());

        let mut chains = AHashMap::new();
        chains.insert(Intent::Browser, browser::chain(search()));
        chains.insert(Intent::Page, page::chain());
        chains.insert(Intent::Ava, ava::chain());
        chains.insert(Intent::OpenWebsite, single(Intent::OpenWebsite).with(OpenWebsiteExecutor));
        chains.insert(Intent::Scroll, single(Intent::Scroll).with(ScrollExecutor));
        chains.insert(Intent::Tags, single(Intent::Tags).with(TagsExecutor));
        chains.insert(Intent::Tab, single(Intent::Tab).with(TabExecutor));
        chains.insert(Intent::Index, single(Intent::Index).with(IndexExecutor));
        chains.insert(Intent::Refresh, single(Intent::Refresh).with(RefreshExecutor));
        chains.insert(Intent::Navigation, single(Intent::Navigation).with(NavigationExecutor));
        chains.insert(Intent::Search, single(Intent::Search).with(search()));
        chains.insert(Intent::AvaMove, single(Intent::AvaMove).with(AvaMoveExecutor));
        chains.insert(Intent::Modal, single(Intent::Modal).with(ModalExecutor));

        Self {
            constructor: CommandConstructor::new(lexicon),
            chains,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.constructor.lexicon()
    }

    pub fn chain(&self, intent: Intent) -> Option<&ExecutorChain> {
        self.chains.get(&intent)
    }

    /// Route one final segment, returning the effects to apply
    pub fn route(&self, segment: &Segment, ctx: &mut ExecutionContext<'_>) -> Result<Vec<Effect>> {
        let intent = effective_intent(segment)?;
        tracing::debug!("Routing segment as {}", intent.as_str());

        match intent {
            Intent::Dictation => {
                let text = dictation_text(segment)?;
                tracing::info!("Dictating {:?}", text);
                ctx.ui.set_dictation(text);
                Ok(Vec::new())
            }
            Intent::Submit => {
                ctx.ui.set_submit();
                Ok(Vec::new())
            }
            other => {
                let command = self.constructor.construct(segment)?;
                let chain = self
                    .chains
                    .get(&other)
                    .ok_or_else(|| AvaError::UnknownIntent(other.as_str().to_string()))?;
                chain.run(&command, ctx)
            }
        }
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}
