//! Command construction - converts a segment's entities into a typed Command
//!
//! One left-to-right pass over the entities. The first verb entity becomes the
//! verb; each noun-typed entity closes a noun slot, taking the adjective staged
//! since the previous noun.

use crate::command::segment::{Entity, Segment, Word};
use crate::core::error::{AvaError, Result};
use crate::lexicon::{
    Adjective, Lexicon, NounCategory, Verb, ADJECTIVE_ENTITY, VERB_ENTITY,
};
use serde::{Deserialize, Serialize};

/// A noun slot filled by an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounWord {
    #[serde(rename = "type")]
    pub kind: NounCategory,
    pub value: String,
}

/// Modifier attached to a noun slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjectiveWord {
    #[serde(rename = "type")]
    pub kind: Adjective,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noun {
    pub noun: NounWord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjective: Option<AdjectiveWord>,
}

impl Noun {
    pub fn is(&self, kind: NounCategory) -> bool {
        self.noun.kind == kind
    }

    pub fn has_adjective(&self, kind: Adjective) -> bool {
        self.adjective.as_ref().is_some_and(|a| a.kind == kind)
    }
}

/// The canonicalized request built from one segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<Verb>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nouns: Vec<Noun>,
    /// Flattened sentence, first letter capitalized
    #[serde(default)]
    pub command: String,
}

impl Command {
    pub fn first_noun(&self) -> Option<&Noun> {
        self.nouns.first()
    }

    /// First noun of the given category
    pub fn find_noun(&self, kind: NounCategory) -> Option<&Noun> {
        self.nouns.iter().find(|n| n.is(kind))
    }

    pub fn has_noun(&self, kind: NounCategory, value: &str) -> bool {
        self.nouns.iter().any(|n| n.is(kind) && n.noun.value == value)
    }

    /// Sentence in lowercase, for pattern-based slot extraction
    pub fn sentence(&self) -> String {
        self.command.to_lowercase()
    }
}

/// Builds the flattened sentence: lowercase words, capitalized first letter
pub fn words_to_sentence(words: &[Word]) -> String {
    let joined = words
        .iter()
        .map(|w| w.value.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts segments into commands using one lexicon
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandConstructor {
    lexicon: Lexicon,
}

impl CommandConstructor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn construct(&self, segment: &Segment) -> Result<Command> {
        if segment.entities.is_empty() {
            return Err(AvaError::EmptySegment);
        }

        let mut command = Command {
            command: words_to_sentence(&segment.words),
            ..Command::default()
        };
        let mut pending_adjective: Option<AdjectiveWord> = None;

        for entity in &segment.entities {
            if command.verb.is_none() && is_verb(entity) {
                command.verb = Some(self.resolve_verb(entity)?);
                continue;
            }

            if is_adjective(entity) && pending_adjective.is_none() {
                pending_adjective = Some(self.resolve_adjective(entity)?);
            }

            if let Some(kind) = NounCategory::from_entity_type(&entity.kind) {
                command.nouns.push(Noun {
                    noun: NounWord {
                        kind,
                        value: entity.value.to_lowercase(),
                    },
                    adjective: pending_adjective.take(),
                });
            }
        }

        if pending_adjective.is_some() {
            tracing::debug!("Dropping trailing adjective with no noun");
        }

        tracing::debug!(
            "Constructed command: verb={:?} nouns={} sentence={:?}",
            command.verb,
            command.nouns.len(),
            command.command
        );

        Ok(command)
    }

    fn resolve_verb(&self, entity: &Entity) -> Result<Verb> {
        self.lexicon
            .verb(&entity.value)
            .ok_or_else(|| AvaError::UnknownVerb(entity.value.clone()))
    }

    fn resolve_adjective(&self, entity: &Entity) -> Result<AdjectiveWord> {
        let kind = self
            .lexicon
            .adjective(&entity.value)
            .ok_or_else(|| AvaError::UnknownAdjective(entity.value.clone()))?;
        Ok(AdjectiveWord {
            kind,
            value: entity.value.to_lowercase(),
        })
    }
}

fn is_verb(entity: &Entity) -> bool {
    entity.kind.eq_ignore_ascii_case(VERB_ENTITY)
}

fn is_adjective(entity: &Entity) -> bool {
    entity.kind.eq_ignore_ascii_case(ADJECTIVE_ENTITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn construct(segment: &Segment) -> Result<Command> {
        CommandConstructor::default().construct(segment)
    }

    #[test]
    fn test_empty_entities_rejected() {
        let segment = Segment::new("browser").with_words("open");
        assert!(matches!(construct(&segment), Err(AvaError::EmptySegment)));
    }

    #[test]
    fn test_open_tab() {
        let segment = Segment::new("browser")
            .with_words("OPEN TAB")
            .with_entity("verb", "OPEN")
            .with_entity("browser", "TAB");
        let command = construct(&segment).unwrap();

        assert_eq!(command.verb, Some(Verb::Open));
        assert_eq!(
            command.nouns,
            vec![Noun {
                noun: NounWord {
                    kind: NounCategory::Browser,
                    value: "tab".into()
                },
                adjective: None,
            }]
        );
        assert_eq!(command.command, "Open tab");
    }

    #[test]
    fn test_first_verb_wins() {
        let segment = Segment::new("browser")
            .with_entity("verb", "close")
            .with_entity("verb", "open")
            .with_entity("browser", "tab");
        let command = construct(&segment).unwrap();

        assert_eq!(command.verb, Some(Verb::Close));
        assert_eq!(command.nouns.len(), 1);
    }

    #[test]
    fn test_adjective_scoped_to_next_noun() {
        let segment = Segment::new("browser")
            .with_entity("adjective", "new")
            .with_entity("browser", "tab")
            .with_entity("browser", "window");
        let command = construct(&segment).unwrap();

        assert_eq!(command.nouns.len(), 2);
        assert!(command.nouns[0].has_adjective(Adjective::New));
        assert_eq!(command.nouns[1].adjective, None);
    }

    #[test]
    fn test_dangling_adjective_dropped() {
        let segment = Segment::new("browser")
            .with_entity("verb", "open")
            .with_entity("adjective", "new")
            .with_entity("action", "search");
        let command = construct(&segment).unwrap();

        assert!(command.nouns.is_empty());
    }

    #[test]
    fn test_second_adjective_before_noun_ignored() {
        let segment = Segment::new("page")
            .with_entity("adjective", "previous")
            .with_entity("adjective", "bogus")
            .with_entity("page", "page");
        let command = construct(&segment).unwrap();

        assert!(command.nouns[0].has_adjective(Adjective::Previous));
    }

    #[test]
    fn test_unknown_adjective_rejected() {
        let segment = Segment::new("browser")
            .with_entity("adjective", "shiny")
            .with_entity("browser", "tab");
        assert!(matches!(
            construct(&segment),
            Err(AvaError::UnknownAdjective(_))
        ));
    }

    #[test]
    fn test_unknown_verb_rejected() {
        let segment = Segment::new("browser").with_entity("verb", "juggle");
        assert!(matches!(construct(&segment), Err(AvaError::UnknownVerb(_))));
    }

    #[test]
    fn test_words_to_sentence() {
        let words = vec![Word::new("SEARCH"), Word::new(""), Word::new("FOR"), Word::new("Cats")];
        assert_eq!(words_to_sentence(&words), "Search for cats");
        assert_eq!(words_to_sentence(&[]), "");
    }

    #[test]
    fn test_command_serialization_shape() {
        let segment = Segment::new("browser")
            .with_words("open new tab")
            .with_entity("verb", "open")
            .with_entity("adjective", "new")
            .with_entity("browser", "tab");
        let command = construct(&segment).unwrap();
        let json = serde_json::to_value(&command).unwrap();

        assert_eq!(json["verb"], "open");
        assert_eq!(json["nouns"][0]["noun"]["type"], "browser");
        assert_eq!(json["nouns"][0]["adjective"]["type"], "new");
        assert_eq!(json["command"], "Open new tab");
    }
}
