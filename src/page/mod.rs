//! The live page the content side runs in
//!
//! Executors only read page metrics; effects are applied afterwards through
//! the mutable methods.

pub mod headless;

pub use headless::HeadlessPage;

use crate::core::types::Viewport;
use crate::tags::dom::Document;

pub trait Page: Send {
    fn viewport(&self) -> Viewport;

    fn document(&self) -> &Document;

    fn document_mut(&mut self) -> &mut Document;

    fn scroll_by(&mut self, left: f64, top: f64);

    fn scroll_to(&mut self, top: f64);

    /// Replace the current document's location
    fn navigate(&mut self, url: &str);

    fn body_scroll_height(&self) -> f64 {
        let doc = self.document();
        doc.get(doc.body()).map_or(0.0, |body| body.scroll_height)
    }

    /// Scroll heights of the body's immediate children
    fn child_scroll_heights(&self) -> Vec<f64> {
        let doc = self.document();
        doc.get(doc.body())
            .map(|body| {
                body.children()
                    .iter()
                    .filter_map(|id| doc.get(*id))
                    .map(|child| child.scroll_height)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Height a "scroll to bottom" should target
    ///
    /// Single-page apps often leave the body at zero height and scroll a child
    /// container instead, so fall back to the tallest immediate child.
    fn max_scroll_height(&self) -> f64 {
        let body = self.body_scroll_height();
        if body > 0.0 {
            return body;
        }
        self.child_scroll_heights()
            .into_iter()
            .fold(0.0, f64::max)
    }
}
