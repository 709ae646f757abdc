//! Numbered overlay state: current tags, activation, dictation and submit

use crate::core::types::Viewport;
use crate::tags::dom::{Document, NodeId};
use crate::tags::scanner::{is_text_target, TagScanner, ValidTag};
use crate::ui::UiState;

/// What activating a tag did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Focused(NodeId),
    Clicked(NodeId),
}

#[derive(Debug)]
pub struct TagOverlay {
    scanner: TagScanner,
    tags: Vec<ValidTag>,
    focused_input: Option<NodeId>,
}

impl TagOverlay {
    pub fn new(scanner: TagScanner) -> Self {
        Self {
            scanner,
            tags: Vec::new(),
            focused_input: None,
        }
    }

    pub fn tags(&self) -> &[ValidTag] {
        &self.tags
    }

    pub fn focused_input(&self) -> Option<NodeId> {
        self.focused_input
    }

    pub fn refresh(&mut self, doc: &Document, viewport: Viewport) {
        self.tags = self.scanner.scan(doc, viewport);
        tracing::debug!("Recomputed {} tags", self.tags.len());
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Rows shown in the tag list modal
    pub fn modal_entries(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|tag| format!("{}. {}", tag.index, tag.display_text))
            .collect()
    }

    /// Focus text-like targets, click everything else
    pub fn activate(&mut self, index: u32, doc: &mut Document) -> Option<Activation> {
        let node = self.tags.iter().find(|t| t.index == index)?.node;
        let element = doc.get(node)?;

        if is_text_target(element) {
            doc.focus(node);
            self.focused_input = Some(node);
            Some(Activation::Focused(node))
        } else {
            doc.click(node);
            Some(Activation::Clicked(node))
        }
    }

    /// Write dictated text into the focused input
    pub fn apply_dictation(&mut self, text: &str, doc: &mut Document) -> bool {
        match self.focused_input {
            Some(input) => {
                doc.set_value(input, text);
                true
            }
            None => false,
        }
    }

    /// Submit the form enclosing the focused input
    pub fn apply_submit(&mut self, doc: &mut Document) -> bool {
        let Some(form) = self.focused_input.and_then(|input| doc.closest(input, "form")) else {
            return false;
        };
        doc.submit(form);
        true
    }

    /// Bring the overlay in line with the UI state after a dispatch
    ///
    /// One-shot requests that can't be applied yet (no focused input) are left
    /// pending so a later activation can pick them up.
    pub fn sync(&mut self, ui: &mut UiState, doc: &mut Document, viewport: Viewport) {
        if ui.show_tag || ui.is_tag_modal_open {
            self.refresh(doc, viewport);
        } else {
            self.clear();
        }

        if let Some(index) = ui.take_context_index() {
            match self.activate(index, doc) {
                Some(activation) => tracing::info!("Activated tag {}: {:?}", index, activation),
                None => tracing::warn!("No tag with index {}", index),
            }
        }

        if let Some(text) = ui.dictation().map(str::to_string) {
            if self.apply_dictation(&text, doc) {
                ui.take_dictation();
            }
        }

        if ui.submit_requested() && self.apply_submit(doc) {
            ui.take_submit();
        }
    }
}
