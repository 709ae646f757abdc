//! Presentation state mutated by the executors
//!
//! These setters are the only way the pipeline touches what the user sees.
//! One-shot requests (context index, dictation, submit) are consumed by the
//! tag overlay through the `take_*` methods.

use serde::{Deserialize, Serialize};

/// Screen corner the assistant widget sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AvaPosition {
    #[default]
    #[serde(rename = "top left")]
    TopLeft,
    #[serde(rename = "top right")]
    TopRight,
    #[serde(rename = "bottom left")]
    BottomLeft,
    #[serde(rename = "bottom right")]
    BottomRight,
}

impl AvaPosition {
    /// Cycle order used when the current corner is requested again
    pub const ROTATION: [AvaPosition; 4] = [
        AvaPosition::TopLeft,
        AvaPosition::TopRight,
        AvaPosition::BottomLeft,
        AvaPosition::BottomRight,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ROTATION.iter().position(|p| *p == self).unwrap_or(0);
        Self::ROTATION[(idx + 1) % Self::ROTATION.len()]
    }

    /// Parse a corner phrase such as "top left" or "Bottom-Right"
    pub fn from_phrase(value: &str) -> Option<Self> {
        let normalized = value
            .to_lowercase()
            .replace('-', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "top left" => Some(AvaPosition::TopLeft),
            "top right" => Some(AvaPosition::TopRight),
            "bottom left" => Some(AvaPosition::BottomLeft),
            "bottom right" => Some(AvaPosition::BottomRight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AvaPosition::TopLeft => "top left",
            AvaPosition::TopRight => "top right",
            AvaPosition::BottomLeft => "bottom left",
            AvaPosition::BottomRight => "bottom right",
        }
    }
}

/// Presentation state shared between executors and the overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub show_tag: bool,
    pub render_tag: bool,
    pub ava_position: AvaPosition,
    pub is_tag_modal_open: bool,
    pub is_reminder_open: bool,
    context_index: Option<u32>,
    dictation: Option<String>,
    submit: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_show_tag(&mut self, value: bool) {
        self.show_tag = value;
    }

    pub fn set_render_tag(&mut self, value: bool) {
        self.render_tag = value;
    }

    pub fn set_context_index(&mut self, index: u32) {
        self.context_index = Some(index);
    }

    pub fn set_dictation(&mut self, dictation: impl Into<String>) {
        self.dictation = Some(dictation.into());
    }

    pub fn set_submit(&mut self) {
        self.submit = true;
    }

    pub fn set_ava_position(&mut self, position: AvaPosition) {
        self.ava_position = position;
    }

    pub fn modal_options(&mut self) -> ModalOptions<'_> {
        ModalOptions { state: self }
    }

    pub fn context_index(&self) -> Option<u32> {
        self.context_index
    }

    pub fn dictation(&self) -> Option<&str> {
        self.dictation.as_deref()
    }

    pub fn submit_requested(&self) -> bool {
        self.submit
    }

    pub fn take_context_index(&mut self) -> Option<u32> {
        self.context_index.take()
    }

    pub fn take_dictation(&mut self) -> Option<String> {
        self.dictation.take()
    }

    pub fn take_submit(&mut self) -> bool {
        std::mem::take(&mut self.submit)
    }

    /// Hide every overlay, as when the tab loses focus
    pub fn hide_overlays(&mut self) {
        self.show_tag = false;
        self.render_tag = false;
        self.is_tag_modal_open = false;
        self.is_reminder_open = false;
    }
}

/// Nested modal controls
pub struct ModalOptions<'a> {
    state: &'a mut UiState,
}

impl ModalOptions<'_> {
    pub fn open_tag_modal(&mut self) {
        self.state.is_tag_modal_open = true;
    }

    pub fn close_tag_modal(&mut self) {
        self.state.is_tag_modal_open = false;
    }

    pub fn set_is_reminder_open(&mut self, is_open: bool) {
        self.state.is_reminder_open = is_open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_is_cyclic() {
        let mut position = AvaPosition::TopLeft;
        let mut seen = Vec::new();
        for _ in 0..4 {
            position = position.next();
            seen.push(position);
        }
        assert_eq!(
            seen,
            vec![
                AvaPosition::TopRight,
                AvaPosition::BottomLeft,
                AvaPosition::BottomRight,
                AvaPosition::TopLeft
            ]
        );
    }

    #[test]
    fn test_corner_phrases() {
        assert_eq!(AvaPosition::from_phrase("Top Left"), Some(AvaPosition::TopLeft));
        assert_eq!(
            AvaPosition::from_phrase("bottom-right"),
            Some(AvaPosition::BottomRight)
        );
        assert_eq!(AvaPosition::from_phrase("middle"), None);
    }

    #[test]
    fn test_one_shot_requests_reset() {
        let mut ui = UiState::new();
        ui.set_context_index(4);
        ui.set_submit();
        ui.set_dictation("hello");

        assert_eq!(ui.take_context_index(), Some(4));
        assert_eq!(ui.take_context_index(), None);
        assert!(ui.take_submit());
        assert!(!ui.take_submit());
        assert_eq!(ui.take_dictation().as_deref(), Some("hello"));
        assert_eq!(ui.dictation(), None);
    }

    #[test]
    fn test_modal_options() {
        let mut ui = UiState::new();
        ui.modal_options().open_tag_modal();
        ui.modal_options().set_is_reminder_open(true);
        assert!(ui.is_tag_modal_open);
        assert!(ui.is_reminder_open);

        ui.hide_overlays();
        assert!(!ui.is_tag_modal_open);
        assert!(!ui.is_reminder_open);
    }
}
