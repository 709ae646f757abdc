//! Dialogue transcript shown next to the assistant

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Speaker {
    Ava,
    User,
}

/// One line of dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: u64,
    pub speaker: Speaker,
    pub text: String,
    pub is_final: bool,
}

/// Bounded dialogue log
///
/// Interim user speech is kept in a single trailing line that is rewritten on
/// every update and committed once the recognizer finalizes it.
#[derive(Debug)]
pub struct Transcript {
    lines: VecDeque<Line>,
    capacity: usize,
    next_id: u64,
}

impl Transcript {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    /// Replace the live user line, or start one
    pub fn update_interim(&mut self, text: &str) {
        if let Some(last) = self.lines.back_mut() {
            if last.speaker == Speaker::User && !last.is_final {
                last.text = text.to_string();
                return;
            }
        }
        self.push(Speaker::User, text, false);
    }

    /// Commit the user's utterance, finalizing any live line
    pub fn commit_user(&mut self, text: &str) {
        if let Some(last) = self.lines.back_mut() {
            if last.speaker == Speaker::User && !last.is_final {
                last.text = text.to_string();
                last.is_final = true;
                return;
            }
        }
        self.push(Speaker::User, text, true);
    }

    pub fn say(&mut self, text: &str) {
        self.push(Speaker::Ava, text, true);
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&Line> {
        self.lines.back()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push(&mut self, speaker: Speaker, text: &str, is_final: bool) {
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(Line {
            id: self.next_id,
            speaker,
            text: text.to_string(),
            is_final,
        });
        self.next_id += 1;
    }
}
