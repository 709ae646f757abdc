//! Assistant domain: tag overlay toggling, widget placement and modals

use crate::command::Command;
use crate::core::error::Result;
use crate::executors::{ExecutionContext, Execution, ExecutorChain, Outcome};
use crate::lexicon::{ModalType, NounCategory, Verb};
use crate::ui::AvaPosition;
use rand::Rng;

/// `[tags, ava_move, modal]`
pub fn chain() -> ExecutorChain {
    ExecutorChain::new("ava")
        .with(TagsExecutor)
        .with(AvaMoveExecutor)
        .with(ModalExecutor)
}

/// Show or hide the numbered tag overlay
pub struct TagsExecutor;

impl Execution for TagsExecutor {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn execute(&self, command: &Command, ctx: &mut ExecutionContext<'_>) -> Result<Outcome> {
        if command.find_noun(NounCategory::Tag).is_none() {
            return Ok(Outcome::NotApplicable);
        }

        let visible = command.verb != Some(Verb::Close);
        ctx.ui.set_show_tag(visible);
        ctx.ui.set_render_tag(visible);
        tracing::info!("Tags {}", if visible { "shown" } else { "hidden" });
        Ok(Outcome::handled())
    }
}

/// Move the assistant widget to a screen corner
pub struct AvaMoveExecutor;

impl Execution for AvaMoveExecutor {
    fn name(&self) -> &'static str {
        "ava_move"
    }

    fn execute(&self, command: &Command, ctx: &mut ExecutionContext<'_>) -> Result<Outcome> {
        if command.verb != Some(Verb::Move) {
            return Ok(Outcome::NotApplicable);
        }

        let target = match command.find_noun(NounCategory::Corner) {
            Some(noun) => match AvaPosition::from_phrase(&noun.noun.value) {
                Some(corner) if corner == ctx.ui.ava_position => corner.next(),
                Some(corner) => corner,
                None => return Ok(Outcome::NotApplicable),
            },
            None => {
                let idx = ctx.rng.gen_range(0..AvaPosition::ROTATION.len());
                AvaPosition::ROTATION[idx]
            }
        };

        tracing::info!("Moving Ava to {}", target.as_str());
        ctx.ui.set_ava_position(target);
        Ok(Outcome::handled())
    }
}

/// Open or close the reminder dialog or the tag list
pub struct ModalExecutor;

impl Execution for ModalExecutor {
    fn name(&self) -> &'static str {
        "modal"
    }

    fn execute(&self, command: &Command, ctx: &mut ExecutionContext<'_>) -> Result<Outcome> {
        let open = match command.verb {
            Some(Verb::Open) => true,
            Some(Verb::Close) => false,
            _ => return Ok(Outcome::NotApplicable),
        };
        let Some(modal) = command
            .find_noun(NounCategory::Modal)
            .and_then(|n| ctx.lexicon.modal(&n.noun.value))
        else {
            return Ok(Outcome::NotApplicable);
        };

        let mut options = ctx.ui.modal_options();
        match (modal, open) {
            (ModalType::Reminder, is_open) => options.set_is_reminder_open(is_open),
            (ModalType::Tags, true) => options.open_tag_modal(),
            (ModalType::Tags, false) => options.close_tag_modal(),
        }
        Ok(Outcome::handled())
    }
}
