//! Finds interactive elements that are actually visible on screen

use crate::core::types::{Rect, Viewport};
use crate::tags::dom::{Document, Element, NodeId};

/// ARIA roles that make a plain `div` an interactive control
pub const CONTROL_ROLES: &[&str] = &[
    "button", "link", "checkbox", "menuitem", "option", "radio", "switch", "tab", "textbox",
    "combobox",
];

/// Roles that accept typed text
pub const TEXT_ROLES: &[&str] = &["textbox", "combobox"];

const FORM_CONTROLS: &[&str] = &["button", "input", "option", "textarea"];

/// Corner probes sit this far inside the box so borders don't hit neighbours
const CORNER_INSET: f64 = 1.0;

/// One numbered overlay target
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTag {
    pub id: String,
    pub node: NodeId,
    pub index: u32,
    pub display_text: String,
    /// Badge top-left, in viewport coordinates
    pub badge: (f64, f64),
}

#[derive(Debug, Clone, Copy)]
pub struct TagScanner {
    badge_width: f64,
    badge_height: f64,
}

impl TagScanner {
    pub fn new(badge_width: f64, badge_height: f64) -> Self {
        Self {
            badge_width,
            badge_height,
        }
    }

    /// Visible interactive elements in document order, indexed from 1
    pub fn scan(&self, doc: &Document, viewport: Viewport) -> Vec<ValidTag> {
        let screen = viewport.rect();

        doc.ids()
            .filter(|id| doc.get(*id).is_some_and(is_interactive))
            .filter(|id| is_visible(doc, *id, &screen))
            .enumerate()
            .filter_map(|(i, node)| {
                let element = doc.get(node)?;
                let index = i as u32 + 1;
                Some(ValidTag {
                    id: format!("ava-tag-{}", index),
                    node,
                    index,
                    display_text: display_text(element),
                    badge: self.badge_position(&element.rect),
                })
            })
            .collect()
    }

    /// Badge straddles the element's top-left corner, or sits inside it when
    /// the element is smaller than the badge
    pub fn badge_position(&self, rect: &Rect) -> (f64, f64) {
        let (left, top) = if rect.width < self.badge_width || rect.height < self.badge_height {
            (rect.left, rect.top)
        } else {
            (
                rect.left - self.badge_width / 2.0,
                rect.top - self.badge_height / 2.0,
            )
        };
        (left.max(0.0), top.max(0.0))
    }
}

pub fn is_interactive(element: &Element) -> bool {
    if element.is("a") || FORM_CONTROLS.contains(&element.tag_name.as_str()) {
        return true;
    }

    element.is("div")
        && (element.has_click_handler
            || element
                .get_attribute("role")
                .is_some_and(|role| CONTROL_ROLES.contains(&role)))
}

/// Whether activation should focus the element rather than click it
pub fn is_text_target(element: &Element) -> bool {
    let text_input = element.is("input")
        && element
            .get_attribute("type")
            .map_or(true, |t| t.eq_ignore_ascii_case("text"));

    text_input
        || element.is("textarea")
        || element
            .get_attribute("role")
            .is_some_and(|role| TEXT_ROLES.contains(&role))
}

fn is_visible(doc: &Document, id: NodeId, screen: &Rect) -> bool {
    let Some(element) = doc.get(id) else {
        return false;
    };

    if element.rect.is_empty() || !element.rect.intersects(screen) || !doc.is_rendered(id) {
        return false;
    }

    let hits_self = |(x, y): (f64, f64)| {
        doc.element_from_point(x, y)
            .is_some_and(|hit| doc.is_within(hit, id))
    };

    let probes: Vec<(f64, f64)> = element
        .rect
        .inset_corners(CORNER_INSET)
        .into_iter()
        .filter(|(x, y)| screen.contains(*x, *y))
        .collect();

    // No corner on screen: probe the middle of the visible part instead
    if probes.is_empty() {
        return hits_self(element.rect.intersection(screen).center());
    }

    // Fully occluded when no corner hit-tests to the element or its subtree
    probes.into_iter().any(hits_self)
}

fn display_text(element: &Element) -> String {
    let text = element.text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    ["aria-label", "placeholder", "value"]
        .iter()
        .find_map(|name| element.get_attribute(name).filter(|v| !v.trim().is_empty()))
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| element.value.trim().to_string())
}
