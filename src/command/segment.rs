//! Recognizer output as consumed by the pipeline

use serde::{Deserialize, Deserializer, Serialize};

/// One recognized token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub value: String,
}

impl Word {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A recognizer-tagged span of the utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Entity {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Top-level intent label attached by the recognizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentLabel {
    pub intent: String,
}

/// One recognized utterance unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub intent: IntentLabel,
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Holes in the recognizer's word array are dropped on input
    #[serde(default, deserialize_with = "skip_missing_words")]
    pub words: Vec<Word>,
    #[serde(default)]
    pub is_final: bool,
}

impl Segment {
    pub fn new(intent: impl Into<String>) -> Self {
        Self {
            intent: IntentLabel {
                intent: intent.into(),
            },
            entities: Vec::new(),
            words: Vec::new(),
            is_final: true,
        }
    }

    pub fn with_entity(mut self, kind: &str, value: &str) -> Self {
        self.entities.push(Entity::new(kind, value));
        self
    }

    /// Replace the word list with the whitespace-split tokens of `sentence`
    pub fn with_words(mut self, sentence: &str) -> Self {
        self.words = sentence.split_whitespace().map(Word::new).collect();
        self
    }

    pub fn interim(mut self) -> Self {
        self.is_final = false;
        self
    }

    /// Raw words joined with single spaces, as shown in the live transcript
    pub fn transcript(&self) -> String {
        self.words
            .iter()
            .map(|w| w.value.as_str())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse a segment from one line of JSON
    pub fn from_json(line: &str) -> crate::core::error::Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

fn skip_missing_words<'de, D>(deserializer: D) -> Result<Vec<Word>, D::Error>
where
    D: Deserializer<'de>,
{
    let words: Vec<Option<Word>> = Vec::deserialize(deserializer)?;
    Ok(words.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_deserialization() {
        let json = r#"{
            "intent": {"intent": "browser", "isFinal": true},
            "entities": [
                {"type": "verb", "value": "OPEN", "startPosition": 0, "endPosition": 1},
                {"type": "browser", "value": "TAB", "startPosition": 2, "endPosition": 3}
            ],
            "words": [{"value": "OPEN", "index": 0}, null, {"value": "TAB", "index": 2}],
            "isFinal": true
        }"#;
        let segment = Segment::from_json(json).unwrap();
        assert_eq!(segment.intent.intent, "browser");
        assert_eq!(segment.entities.len(), 2);
        assert_eq!(segment.entities[1], Entity::new("browser", "TAB"));
        assert_eq!(segment.words.len(), 2);
        assert!(segment.is_final);
    }

    #[test]
    fn test_missing_fields_default() {
        let segment = Segment::from_json(r#"{"intent": {"intent": "page"}}"#).unwrap();
        assert!(segment.entities.is_empty());
        assert!(segment.words.is_empty());
        assert!(!segment.is_final);
    }

    #[test]
    fn test_transcript_joins_words() {
        let segment = Segment::new("page").with_words("SCROLL  DOWN");
        assert_eq!(segment.transcript(), "SCROLL DOWN");
    }
}
