//! Page domain: history navigation, scrolling and tag index selection

use crate::command::Command;
use crate::core::error::{AvaError, Result};
use crate::executors::{Effect, Execution, ExecutionContext, ExecutorChain, Outcome};
use crate::lexicon::{parse_index, Adjective, NounCategory, Verb};
use crate::relay::Message;

/// `[navigation, scroll, index]`
pub fn chain() -> ExecutorChain {
    ExecutorChain::new("page")
        .with(NavigationExecutor)
        .with(ScrollExecutor)
        .with(IndexExecutor)
}

/// Back/forward through the relay; the relay reads the direction off the command
pub struct NavigationExecutor;

impl Execution for NavigationExecutor {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn execute(&self, command: &Command, _ctx: &mut ExecutionContext<'_>) -> Result<Outcome> {
        let page_nouns = || command.nouns.iter().filter(|n| n.is(NounCategory::Page));

        let open_page = command.verb == Some(Verb::Open)
            && (command.nouns.is_empty() || page_nouns().next().is_some());
        let previous_page = page_nouns().any(|n| n.has_adjective(Adjective::Previous));

        if !open_page && !previous_page {
            return Ok(Outcome::NotApplicable);
        }
        Ok(Outcome::effect(Effect::Relay(Message::navigation(
            command.clone(),
        ))))
    }
}

pub struct ScrollExecutor;

impl ScrollExecutor {
    fn direction(value: &str, ctx: &ExecutionContext<'_>) -> Result<Effect> {
        if !ctx.lexicon.is_direction(value) {
            return Err(AvaError::InvalidScroll(value.to_string()));
        }

        let viewport = ctx.page.viewport();
        let (left, top) = match value.trim() {
            "up" => (0.0, -viewport.height / 2.0),
            "down" => (0.0, viewport.height / 2.0),
            "left" => (-viewport.width / 2.0, 0.0),
            "right" => (viewport.width / 2.0, 0.0),
            other => return Err(AvaError::InvalidScroll(other.to_string())),
        };
        Ok(Effect::ScrollBy { left, top })
    }

    fn position(value: &str, ctx: &ExecutionContext<'_>) -> Result<Effect> {
        if !ctx.lexicon.is_side(value) {
            return Err(AvaError::InvalidScroll(value.to_string()));
        }

        match value.trim() {
            "top" => Ok(Effect::ScrollTo { top: 0.0 }),
            "bottom" => Ok(Effect::ScrollTo {
                top: ctx.page.max_scroll_height(),
            }),
            other => Err(AvaError::InvalidScroll(other.to_string())),
        }
    }
}

impl Execution for ScrollExecutor {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn execute(&self, command: &Command, ctx: &mut ExecutionContext<'_>) -> Result<Outcome> {
        if command.verb != Some(Verb::Move) || command.nouns.is_empty() {
            return Ok(Outcome::NotApplicable);
        }

        let direction = command.find_noun(NounCategory::Direction);
        let position = command.find_noun(NounCategory::Position);
        if direction.is_none() && position.is_none() {
            return Ok(Outcome::NotApplicable);
        }

        ctx.ui.set_show_tag(false);

        let effect = match direction {
            Some(noun) => Self::direction(&noun.noun.value, ctx)?,
            None => match position {
                Some(noun) => Self::position(&noun.noun.value, ctx)?,
                None => return Ok(Outcome::NotApplicable),
            },
        };
        Ok(Outcome::effect(effect))
    }
}

/// Select a tag by its number
pub struct IndexExecutor;

impl Execution for IndexExecutor {
    fn name(&self) -> &'static str {
        "index"
    }

    fn execute(&self, command: &Command, ctx: &mut ExecutionContext<'_>) -> Result<Outcome> {
        let Some(noun) = command.first_noun().filter(|n| n.is(NounCategory::Index)) else {
            return Ok(Outcome::NotApplicable);
        };

        let index = parse_index(&noun.noun.value)
            .ok_or_else(|| AvaError::InvalidIndex(noun.noun.value.clone()))?;
        ctx.ui.set_context_index(index);
        Ok(Outcome::handled())
    }
}
