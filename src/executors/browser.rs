//! Browser domain: tabs, websites, reload and search

use crate::command::Command;
use crate::core::error::Result;
use crate::executors::search::SearchExecutor;
use crate::executors::{Effect, Execution, ExecutionContext, ExecutorChain, Outcome};
use crate::lexicon::{NounCategory, Verb};
use crate::relay::{website_url, Message};

/// `[tab, open_website, refresh, search]`
pub fn chain(search: SearchExecutor) -> ExecutorChain {
    ExecutorChain::new("browser")
        .with(TabExecutor)
        .with(OpenWebsiteExecutor)
        .with(RefreshExecutor)
        .with(search)
}

/// Open or close a tab through the relay
pub struct TabExecutor;

impl Execution for TabExecutor {
    fn name(&self) -> &'static str {
        "tab"
    }

    fn execute(&self, command: &Command, _ctx: &mut ExecutionContext<'_>) -> Result<Outcome> {
        let verb_matches = matches!(command.verb, Some(Verb::Open | Verb::Close));
        if !verb_matches || !command.has_noun(NounCategory::Browser, "tab") {
            return Ok(Outcome::NotApplicable);
        }
        Ok(Outcome::effect(Effect::Relay(Message::tab(command.clone()))))
    }
}

/// Navigate the current page to a spoken website
pub struct OpenWebsiteExecutor;

impl Execution for OpenWebsiteExecutor {
    fn name(&self) -> &'static str {
        "open_website"
    }

    fn execute(&self, command: &Command, _ctx: &mut ExecutionContext<'_>) -> Result<Outcome> {
        if command.verb != Some(Verb::Open) {
            return Ok(Outcome::NotApplicable);
        }
        match command.first_noun() {
            Some(noun) if noun.is(NounCategory::Website) && !noun.noun.value.trim().is_empty() => {
                Ok(Outcome::effect(Effect::Navigate(website_url(&noun.noun.value))))
            }
            _ => Ok(Outcome::NotApplicable),
        }
    }
}

pub struct RefreshExecutor;

impl Execution for RefreshExecutor {
    fn name(&self) -> &'static str {
        "refresh"
    }

    fn execute(&self, command: &Command, _ctx: &mut ExecutionContext<'_>) -> Result<Outcome> {
        if command.verb != Some(Verb::Refresh) {
            return Ok(Outcome::NotApplicable);
        }
        Ok(Outcome::effect(Effect::Relay(Message::refresh())))
    }
}
