//! UI module - presentation state and dialogue transcript

pub mod state;
pub mod transcript;

pub use state::{AvaPosition, ModalOptions, UiState};
pub use transcript::{Line, Speaker, Transcript};
