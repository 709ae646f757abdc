//! Payloads crossing the content/background boundary

use crate::command::Command;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Where search results should open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disposition {
    #[default]
    CurrentTab,
    NewTab,
    NewWindow,
}

/// Relay operation family; unrecognized strings map to `Unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayIntent {
    Tab,
    Refresh,
    Navigation,
    Search,
    Unknown,
}

impl RelayIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayIntent::Tab => "tabs",
            RelayIntent::Refresh => "refresh",
            RelayIntent::Navigation => "navigation",
            RelayIntent::Search => "search",
            RelayIntent::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tab" | "tabs" => RelayIntent::Tab,
            "refresh" => RelayIntent::Refresh,
            "navigation" => RelayIntent::Navigation,
            "search" => RelayIntent::Search,
            _ => RelayIntent::Unknown,
        }
    }
}

impl Serialize for RelayIntent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RelayIntent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(RelayIntent::parse(&value))
    }
}

/// URL for a spoken website name
///
/// "docs.rs" stays as is, "wikipedia" becomes "wikipedia.com".
pub fn website_url(spoken: &str) -> String {
    let host: String = spoken.split_whitespace().collect();
    if host.contains('.') {
        format!("https://{}", host)
    } else {
        format!("https://{}.com", host)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub disposition: Disposition,
    pub query: String,
}

/// Request for a privileged browser operation
///
/// Carries either the raw command for the relay to inspect, or the minimal
/// explicit fields (`action`, `tab_position`, `website`, `search`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub intent: RelayIntent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchRequest>,
}

impl Message {
    fn bare(intent: RelayIntent) -> Self {
        Self {
            intent,
            command: None,
            action: None,
            tab_position: None,
            website: None,
            search: None,
        }
    }

    pub fn tab(command: Command) -> Self {
        Self {
            command: Some(command),
            ..Self::bare(RelayIntent::Tab)
        }
    }

    pub fn refresh() -> Self {
        Self::bare(RelayIntent::Refresh)
    }

    pub fn navigation(command: Command) -> Self {
        Self {
            command: Some(command),
            ..Self::bare(RelayIntent::Navigation)
        }
    }

    pub fn search(disposition: Disposition, query: impl Into<String>) -> Self {
        Self {
            search: Some(SearchRequest {
                disposition,
                query: query.into(),
            }),
            ..Self::bare(RelayIntent::Search)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_message_json() {
        let message = Message::search(Disposition::NewTab, "cat videos");
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["intent"], "search");
        assert_eq!(json["search"]["disposition"], "NEW_TAB");
        assert_eq!(json["search"]["query"], "cat videos");
        assert!(json.get("command").is_none());
    }

    #[test]
    fn test_website_url_normalization() {
        assert_eq!(website_url("wikipedia"), "https://wikipedia.com");
        assert_eq!(website_url("git hub.com"), "https://github.com");
        assert_eq!(website_url("docs.rs"), "https://docs.rs");
    }

    #[test]
    fn test_unknown_intent_deserializes() {
        let message: Message = serde_json::from_str(r#"{"intent": "bookmark"}"#).unwrap();
        assert_eq!(message.intent, RelayIntent::Unknown);
    }

    #[test]
    fn test_tab_intent_aliases() {
        let a: Message = serde_json::from_str(r#"{"intent": "tabs", "tabPosition": 2}"#).unwrap();
        let b: Message = serde_json::from_str(r#"{"intent": "tab"}"#).unwrap();
        assert_eq!(a.intent, RelayIntent::Tab);
        assert_eq!(a.tab_position, Some(2));
        assert_eq!(b.intent, RelayIntent::Tab);
    }
}
