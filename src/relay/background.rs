//! Background relay - performs privileged operations for the content side
//!
//! Absent tabs (a position past the end of the strip, a sender without a tab)
//! are silent no-ops rather than errors.

use crate::command::Command;
use crate::core::error::APOLOGY;
use crate::core::types::TabId;
use crate::lexicon::{parse_index, Adjective, Lexicon, NounCategory, Verb};
use crate::relay::activity::ActivityHub;
use crate::relay::host::BrowserHost;
use crate::relay::message::{website_url, Message, RelayIntent};

const BACK_ACTIONS: &str = "back previous";
const FORWARD_ACTIONS: &str = "forward next";

/// Reply to a relay request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayReply {
    Done,
    /// The request could not be understood; the text is voiced to the user
    Apology(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryStep {
    Back,
    Forward,
}

pub struct BackgroundRelay<H: BrowserHost> {
    host: H,
    lexicon: Lexicon,
    activity: ActivityHub,
    last_active: Option<TabId>,
}

impl<H: BrowserHost> BackgroundRelay<H> {
    pub fn new(host: H, lexicon: Lexicon) -> Self {
        Self {
            host,
            lexicon,
            activity: ActivityHub::new(),
            last_active: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn activity_mut(&mut self) -> &mut ActivityHub {
        &mut self.activity
    }

    /// Handle one message sent from the content script running in `sender`
    pub async fn handle(&mut self, message: &Message, sender: Option<TabId>) -> RelayReply {
        tracing::debug!("Relay received {:?} from {:?}", message.intent, sender);

        let reply = match message.intent {
            RelayIntent::Tab => {
                self.handle_tab(message, sender).await;
                RelayReply::Done
            }
            RelayIntent::Refresh => {
                if let Some(tab) = sender {
                    self.host.reload_tab(tab).await;
                }
                RelayReply::Done
            }
            RelayIntent::Navigation => self.handle_navigation(message, sender).await,
            RelayIntent::Search => {
                self.handle_search(message, sender).await;
                RelayReply::Done
            }
            RelayIntent::Unknown => RelayReply::Apology(APOLOGY.to_string()),
        };

        self.publish_activation().await;
        reply
    }

    /// Push the current active-tab state to every port if it changed
    pub async fn publish_activation(&mut self) {
        let active = self.host.active_tab().await;
        if active != self.last_active {
            self.last_active = active;
            if let Some(tab) = active {
                self.activity.on_activated(tab);
            }
        }
    }

    async fn handle_tab(&self, message: &Message, sender: Option<TabId>) {
        let command = message.command.clone().unwrap_or_default();

        match command.verb {
            None => {
                self.host.create_tab(None).await;
            }
            Some(Verb::Open) => {
                if let Some(tab) = self.tab_at_position(message, &command).await {
                    self.host.activate_tab(tab).await;
                    return;
                }

                let website = message.website.clone().or_else(|| {
                    command
                        .find_noun(NounCategory::Website)
                        .map(|n| n.noun.value.clone())
                });
                match website {
                    Some(site) => {
                        let url = website_url(&site);
                        self.host.create_tab(Some(&url)).await;
                    }
                    None => {
                        self.host.create_tab(None).await;
                    }
                }
            }
            Some(Verb::Close) => {
                let target = match self.tab_at_position(message, &command).await {
                    Some(tab) => Some(tab),
                    None if has_position(message, &command) => None,
                    None => sender,
                };
                if let Some(tab) = target {
                    self.host.remove_tab(tab).await;
                }
            }
            Some(other) => {
                tracing::debug!("Ignoring tab request with verb {:?}", other);
            }
        }
    }

    /// Tab at the requested 1-based position in the current window
    async fn tab_at_position(&self, message: &Message, command: &Command) -> Option<TabId> {
        let position = requested_position(message, command)?;
        let tabs = self.host.current_window_tabs().await;
        let tab = position
            .checked_sub(1)
            .and_then(|i| tabs.get(i as usize).copied());
        if tab.is_none() {
            tracing::debug!("No tab at position {} ({} open)", position, tabs.len());
        }
        tab
    }

    async fn handle_navigation(&self, message: &Message, sender: Option<TabId>) -> RelayReply {
        let Some(tab) = sender else {
            return RelayReply::Done;
        };

        match self.history_step(message) {
            Some(HistoryStep::Back) => self.host.go_back(tab).await,
            Some(HistoryStep::Forward) => self.host.go_forward(tab).await,
            None => return RelayReply::Apology(APOLOGY.to_string()),
        }
        RelayReply::Done
    }

    fn history_step(&self, message: &Message) -> Option<HistoryStep> {
        if let Some(action) = &message.action {
            return self.classify_step(action);
        }

        let command = message.command.as_ref()?;
        if command
            .nouns
            .iter()
            .any(|n| n.is(NounCategory::Page) && n.has_adjective(Adjective::Previous))
        {
            return Some(HistoryStep::Back);
        }

        command
            .sentence()
            .split_whitespace()
            .find_map(|word| self.classify_step(word))
    }

    fn classify_step(&self, word: &str) -> Option<HistoryStep> {
        if self.lexicon.matches(BACK_ACTIONS, word) {
            Some(HistoryStep::Back)
        } else if self.lexicon.matches(FORWARD_ACTIONS, word) {
            Some(HistoryStep::Forward)
        } else {
            None
        }
    }

    async fn handle_search(&self, message: &Message, sender: Option<TabId>) {
        let Some(search) = &message.search else {
            return;
        };
        if search.query.trim().is_empty() || sender.is_none() {
            return;
        }
        self.host.search(search.query.trim(), search.disposition).await;
    }
}

fn requested_position(message: &Message, command: &Command) -> Option<u32> {
    message.tab_position.or_else(|| {
        command
            .find_noun(NounCategory::Index)
            .and_then(|n| parse_index(&n.noun.value))
    })
}

fn has_position(message: &Message, command: &Command) -> bool {
    requested_position(message, command).is_some()
}
