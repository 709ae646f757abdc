//! Alias membership tests and index-word parsing

use serde::{Deserialize, Serialize};

/// Containment policy for alias strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Raw substring containment
    Substring,
    /// The value's words must appear as a contiguous run of alias words
    #[default]
    Tokenized,
}

impl MatchMode {
    pub fn matches(self, aliases: &str, value: &str) -> bool {
        let value = value.trim().to_lowercase();
        if value.is_empty() {
            return false;
        }

        match self {
            MatchMode::Substring => aliases.contains(&value),
            MatchMode::Tokenized => {
                let needle: Vec<&str> = value.split_whitespace().collect();
                let haystack: Vec<&str> = aliases.split_whitespace().collect();
                haystack.windows(needle.len()).any(|window| window == needle.as_slice())
            }
        }
    }
}

const NUMBER_WORDS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

/// Parse an index entity value: digits, or a number word up to twenty
pub fn parse_index(value: &str) -> Option<u32> {
    let value = value.trim().to_lowercase();
    if let Ok(n) = value.parse::<u32>() {
        return Some(n);
    }

    NUMBER_WORDS
        .iter()
        .position(|word| *word == value)
        .map(|n| n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenized_multiword() {
        let aliases = "open show me go back to navigate";
        assert!(MatchMode::Tokenized.matches(aliases, "go back to"));
        assert!(MatchMode::Tokenized.matches(aliases, "show me"));
        assert!(!MatchMode::Tokenized.matches(aliases, "me go back to open"));
        assert!(!MatchMode::Tokenized.matches(aliases, "nav"));
    }

    #[test]
    fn test_empty_value_never_matches() {
        assert!(!MatchMode::Substring.matches("open", ""));
        assert!(!MatchMode::Tokenized.matches("open", "   "));
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("3"), Some(3));
        assert_eq!(parse_index(" 12 "), Some(12));
        assert_eq!(parse_index("Seven"), Some(7));
        assert_eq!(parse_index("twenty"), Some(20));
        assert_eq!(parse_index("many"), None);
        assert_eq!(parse_index("-1"), None);
    }
}
