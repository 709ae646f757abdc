//! Static word tables mapping recognizer output to canonical categories
//!
//! Each table maps a canonical category to a space-joined alias string.
//! Membership is "does the alias string contain this value", with the exact
//! containment test chosen by [`MatchMode`].

pub mod matching;

pub use matching::{parse_index, MatchMode};

use serde::{Deserialize, Serialize};

/// Entity type carrying the command verb
pub const VERB_ENTITY: &str = "verb";

/// Entity type carrying a noun modifier
pub const ADJECTIVE_ENTITY: &str = "adjective";

/// Canonical verb families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Move,
    Open,
    Close,
    Refresh,
}

/// Canonical adjectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjective {
    New,
    Current,
    Previous,
}

/// Noun categories an entity type can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NounCategory {
    Modal,
    Index,
    Website,
    Ava,
    Date,
    Time,
    Browser,
    Page,
    Corner,
    Tag,
    Form,
    Direction,
    Position,
}

/// Assistant-owned modal dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModalType {
    Reminder,
    Tags,
}

pub const VERBS: &[(Verb, &str)] = &[
    (Verb::Move, "move out scroll"),
    (Verb::Open, "open show me go back to navigate"),
    (Verb::Close, "close hide remove"),
    (Verb::Refresh, "refresh reload"),
];

pub const ADJECTIVES: &[(Adjective, &str)] = &[
    (Adjective::New, "new another"),
    (Adjective::Current, "current this"),
    (Adjective::Previous, "previous"),
];

/// Entity type strings accepted for each noun category
pub const NOUNS: &[(NounCategory, &str)] = &[
    (NounCategory::Modal, "modal"),
    (NounCategory::Index, "index"),
    (NounCategory::Website, "website"),
    (NounCategory::Ava, "ava"),
    (NounCategory::Date, "date"),
    (NounCategory::Time, "time"),
    (NounCategory::Browser, "browser"),
    (NounCategory::Page, "page"),
    (NounCategory::Corner, "corner"),
    (NounCategory::Tag, "tag link tags links"),
    (NounCategory::Form, "form"),
    (NounCategory::Direction, "direction"),
    (NounCategory::Position, "position"),
];

/// Checked in order: "modal" alone names the reminder dialog
pub const MODALS: &[(ModalType, &str)] = &[
    (ModalType::Reminder, "reminders reminder modal"),
    (ModalType::Tags, "tag list tag modal links tags"),
];

pub const DIRECTIONS: &str = "up down left right";
pub const SIDES: &str = "top bottom";

impl NounCategory {
    /// Resolve an entity type string to its noun category
    ///
    /// Entity types are recognizer identifiers, so this is always a whole-word
    /// lookup regardless of the lexicon's match mode.
    pub fn from_entity_type(entity_type: &str) -> Option<Self> {
        let entity_type = entity_type.to_lowercase();
        NOUNS
            .iter()
            .find(|(_, aliases)| aliases.split_whitespace().any(|alias| alias == entity_type))
            .map(|(category, _)| *category)
    }
}

/// Alias tables bound to a matching policy
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    mode: MatchMode,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}

impl Lexicon {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Does `aliases` contain `value` under this lexicon's policy
    pub fn matches(&self, aliases: &str, value: &str) -> bool {
        self.mode.matches(aliases, value)
    }

    pub fn verb(&self, value: &str) -> Option<Verb> {
        VERBS
            .iter()
            .find(|(_, aliases)| self.matches(aliases, value))
            .map(|(verb, _)| *verb)
    }

    pub fn adjective(&self, value: &str) -> Option<Adjective> {
        ADJECTIVES
            .iter()
            .find(|(_, aliases)| self.matches(aliases, value))
            .map(|(adjective, _)| *adjective)
    }

    pub fn modal(&self, value: &str) -> Option<ModalType> {
        MODALS
            .iter()
            .find(|(_, aliases)| self.matches(aliases, value))
            .map(|(modal, _)| *modal)
    }

    pub fn is_direction(&self, value: &str) -> bool {
        self.matches(DIRECTIONS, value)
    }

    pub fn is_side(&self, value: &str) -> bool {
        self.matches(SIDES, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_aliases_resolve_to_family() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.verb("Show me"), Some(Verb::Open));
        assert_eq!(lexicon.verb("navigate"), Some(Verb::Open));
        assert_eq!(lexicon.verb("scroll"), Some(Verb::Move));
        assert_eq!(lexicon.verb("hide"), Some(Verb::Close));
        assert_eq!(lexicon.verb("RELOAD"), Some(Verb::Refresh));
        assert_eq!(lexicon.verb("jump"), None);
    }

    #[test]
    fn test_tokenized_rejects_fragments() {
        let lexicon = Lexicon::new(MatchMode::Tokenized);
        assert_eq!(lexicon.verb("pen"), None);
        assert_eq!(lexicon.adjective("ne"), None);
    }

    #[test]
    fn test_substring_accepts_fragments() {
        let lexicon = Lexicon::new(MatchMode::Substring);
        assert_eq!(lexicon.verb("pen"), Some(Verb::Open));
        assert_eq!(lexicon.adjective("ne"), Some(Adjective::New));
    }

    #[test]
    fn test_tag_category_aliases() {
        for entity_type in ["tag", "link", "tags", "links", "LINKS"] {
            assert_eq!(
                NounCategory::from_entity_type(entity_type),
                Some(NounCategory::Tag)
            );
        }
        assert_eq!(NounCategory::from_entity_type("verb"), None);
        assert_eq!(NounCategory::from_entity_type("action"), None);
    }

    #[test]
    fn test_modal_prefers_reminder() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.modal("modal"), Some(ModalType::Reminder));
        assert_eq!(lexicon.modal("reminders"), Some(ModalType::Reminder));
        assert_eq!(lexicon.modal("tag list"), Some(ModalType::Tags));
        assert_eq!(lexicon.modal("links"), Some(ModalType::Tags));
        assert_eq!(lexicon.modal("calendar"), None);
    }

    #[test]
    fn test_verb_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Verb::Refresh).unwrap(), "\"refresh\"");
        assert_eq!(
            serde_json::to_string(&NounCategory::Browser).unwrap(),
            "\"browser\""
        );
    }
}
