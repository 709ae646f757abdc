//! Domain executors - ordered chains of matchers that claim commands
//!
//! Each executor either claims a command (returning the effects to apply) or
//! declines it. A chain tries its executors in declared order and stops at the
//! first claim. Executors only read the page; effects are applied afterwards by
//! the assistant session.

pub mod ava;
pub mod browser;
pub mod page;
pub mod search;

pub use search::{QueryExtractor, RegexQueryExtractor, SearchSlots};

use crate::command::Command;
use crate::core::error::{AvaError, Result};
use crate::lexicon::Lexicon;
use crate::page::Page;
use crate::relay::Message;
use crate::ui::UiState;
use rand_chacha::ChaCha8Rng;

/// A side effect produced by an executor
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Navigate(String),
    ScrollBy { left: f64, top: f64 },
    ScrollTo { top: f64 },
    Relay(Message),
}

/// Result of offering a command to one executor
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Handled(Vec<Effect>),
    NotApplicable,
}

impl Outcome {
    pub fn handled() -> Self {
        Outcome::Handled(Vec::new())
    }

    pub fn effect(effect: Effect) -> Self {
        Outcome::Handled(vec![effect])
    }
}

/// Everything an executor may read or mutate while deciding
pub struct ExecutionContext<'a> {
    pub ui: &'a mut UiState,
    pub page: &'a dyn Page,
    pub lexicon: &'a Lexicon,
    pub rng: &'a mut ChaCha8Rng,
}

pub trait Execution: Send + Sync {
    fn name(&self) -> &'static str;

    fn execute(&self, command: &Command, ctx: &mut ExecutionContext<'_>) -> Result<Outcome>;
}

/// First-match-wins executor list for one domain
pub struct ExecutorChain {
    domain: &'static str,
    executors: Vec<Box<dyn Execution>>,
}

impl ExecutorChain {
    pub fn new(domain: &'static str) -> Self {
        Self {
            domain,
            executors: Vec::new(),
        }
    }

    pub fn with(mut self, executor: impl Execution + 'static) -> Self {
        self.executors.push(Box::new(executor));
        self
    }

    pub fn domain(&self) -> &'static str {
        self.domain
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.executors.iter().map(|e| e.name()).collect()
    }

    /// Run the chain; errors when no executor claims the command
    pub fn run(&self, command: &Command, ctx: &mut ExecutionContext<'_>) -> Result<Vec<Effect>> {
        for executor in &self.executors {
            if let Outcome::Handled(effects) = executor.execute(command, ctx)? {
                tracing::debug!(
                    "{} executor '{}' claimed command ({} effects)",
                    self.domain,
                    executor.name(),
                    effects.len()
                );
                return Ok(effects);
            }
        }

        tracing::debug!("No {} executor matched {:?}", self.domain, command.command);
        Err(AvaError::NoExecutorMatched {
            domain: self.domain,
        })
    }
}

impl std::fmt::Debug for ExecutorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorChain")
            .field("domain", &self.domain)
            .field("executors", &self.names())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::command::{CommandConstructor, Segment};
    use crate::page::HeadlessPage;
    use rand::SeedableRng;

    /// Owned pieces an `ExecutionContext` borrows from
    pub struct Fixture {
        pub ui: UiState,
        pub page: HeadlessPage,
        pub lexicon: Lexicon,
        pub rng: ChaCha8Rng,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self::with_page(HeadlessPage::default())
        }

        pub fn with_page(page: HeadlessPage) -> Self {
            Self {
                ui: UiState::new(),
                page,
                lexicon: Lexicon::default(),
                rng: ChaCha8Rng::seed_from_u64(7),
            }
        }

        pub fn ctx(&mut self) -> ExecutionContext<'_> {
            ExecutionContext {
                ui: &mut self.ui,
                page: &self.page,
                lexicon: &self.lexicon,
                rng: &mut self.rng,
            }
        }
    }

    pub fn command(segment: Segment) -> Command {
        CommandConstructor::default().construct(&segment).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{command, Fixture};
    use super::*;
    use crate::command::Segment;

    struct Decline;

    impl Execution for Decline {
        fn name(&self) -> &'static str {
            "decline"
        }

        fn execute(&self, _: &Command, _: &mut ExecutionContext<'_>) -> Result<Outcome> {
            Ok(Outcome::NotApplicable)
        }
    }

    struct Claim(&'static str);

    impl Execution for Claim {
        fn name(&self) -> &'static str {
            self.0
        }

        fn execute(&self, _: &Command, _: &mut ExecutionContext<'_>) -> Result<Outcome> {
            Ok(Outcome::effect(Effect::Navigate(self.0.to_string())))
        }
    }

    #[test]
    fn test_first_claim_wins() {
        let chain = ExecutorChain::new("test")
            .with(Decline)
            .with(Claim("first"))
            .with(Claim("second"));
        let mut fixture = Fixture::new();
        let cmd = command(Segment::new("page").with_entity("verb", "open"));

        let effects = chain.run(&cmd, &mut fixture.ctx()).unwrap();
        assert_eq!(effects, vec![Effect::Navigate("first".into())]);
    }

    #[test]
    fn test_unclaimed_command_errors() {
        let chain = ExecutorChain::new("page").with(Decline);
        let mut fixture = Fixture::new();
        let cmd = command(Segment::new("page").with_entity("verb", "open"));

        let err = chain.run(&cmd, &mut fixture.ctx()).unwrap_err();
        assert!(matches!(err, AvaError::NoExecutorMatched { domain: "page" }));
    }
}
