//! Page without a browser: an in-memory document plus scroll and location state

use crate::core::types::{Rect, Viewport};
use crate::page::Page;
use crate::tags::dom::Document;

#[derive(Debug, Clone)]
pub struct HeadlessPage {
    viewport: Viewport,
    document: Document,
    scroll_x: f64,
    scroll_y: f64,
    location: String,
}

impl HeadlessPage {
    pub fn new(viewport: Viewport, location: &str) -> Self {
        Self {
            viewport,
            document: Document::new(Rect::new(0.0, 0.0, viewport.width, viewport.height)),
            scroll_x: 0.0,
            scroll_y: 0.0,
            location: location.to_string(),
        }
    }

    pub fn with_document(mut self, document: Document) -> Self {
        self.document = document;
        self
    }

    pub fn scroll_position(&self) -> (f64, f64) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    fn max_scroll_y(&self) -> f64 {
        (self.max_scroll_height() - self.viewport.height).max(0.0)
    }
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new(Viewport::default(), "about:blank")
    }
}

impl Page for HeadlessPage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    fn scroll_by(&mut self, left: f64, top: f64) {
        self.scroll_x = (self.scroll_x + left).max(0.0);
        self.scroll_y = (self.scroll_y + top).clamp(0.0, self.max_scroll_y());
    }

    fn scroll_to(&mut self, top: f64) {
        self.scroll_y = top.clamp(0.0, self.max_scroll_y());
    }

    fn navigate(&mut self, url: &str) {
        tracing::info!("Navigating to {}", url);
        self.location = url.to_string();
    }
}
