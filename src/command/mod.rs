//! Command interpretation pipeline
//!
//! Converts recognizer Segments into typed Commands:
//! Segment -> CommandConstructor -> Command -> IntentRouter -> executor chain

pub mod constructor;
pub mod segment;

pub use constructor::{words_to_sentence, AdjectiveWord, Command, CommandConstructor, Noun, NounWord};
pub use segment::{Entity, IntentLabel, Segment, Word};
