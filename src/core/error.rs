use thiserror::Error;

/// The one sentence users hear whenever an utterance could not be acted on
pub const APOLOGY: &str = "I'm sorry, could you repeat that?";

#[derive(Error, Debug)]
pub enum AvaError {
    #[error("Segment has no entities")]
    EmptySegment,

    #[error("Unknown verb: {0}")]
    UnknownVerb(String),

    #[error("Unknown adjective: {0}")]
    UnknownAdjective(String),

    #[error("Unknown intent: {0}")]
    UnknownIntent(String),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Invalid scroll target: {0}")]
    InvalidScroll(String),

    #[error("Dictation segment carried no text")]
    EmptyDictation,

    #[error("No {domain} executor matched the command")]
    NoExecutorMatched { domain: &'static str },

    #[error("Relay rejected message: {0}")]
    RelayRejected(String),

    #[error("Relay did not answer within {0} ms")]
    RelayTimeout(u64),

    #[error("Relay channel closed")]
    RelayClosed,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl AvaError {
    /// Text voiced back to the user in the transcript
    pub fn user_message(&self) -> String {
        match self {
            AvaError::RelayRejected(reply) => reply.clone(),
            _ => APOLOGY.to_string(),
        }
    }

    /// Whether this error came from interpreting the utterance itself
    pub fn is_recognition(&self) -> bool {
        matches!(
            self,
            AvaError::EmptySegment
                | AvaError::UnknownVerb(_)
                | AvaError::UnknownAdjective(_)
                | AvaError::UnknownIntent(_)
                | AvaError::InvalidIndex(_)
                | AvaError::InvalidScroll(_)
                | AvaError::EmptyDictation
                | AvaError::NoExecutorMatched { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AvaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_errors_share_apology() {
        let errors = [
            AvaError::EmptySegment,
            AvaError::UnknownVerb("jump".into()),
            AvaError::UnknownIntent("weather".into()),
            AvaError::NoExecutorMatched { domain: "page" },
            AvaError::RelayTimeout(2000),
        ];
        for err in errors {
            assert_eq!(err.user_message(), APOLOGY);
        }
    }

    #[test]
    fn test_relay_rejection_keeps_reply() {
        let err = AvaError::RelayRejected("No tab to go back in".into());
        assert_eq!(err.user_message(), "No tab to go back in");
        assert!(!err.is_recognition());
    }
}
