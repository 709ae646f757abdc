//! In-memory document model the overlay scans and acts on
//!
//! Nodes live in an arena. Paint order is insertion order, so a node appended
//! later sits above earlier nodes with the same z-index.

use crate::core::types::Rect;
use ahash::AHashMap;

/// Marker attribute carried by the assistant's own subtree
pub const AVA_ATTRIBUTE: &str = "data-ava";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// The computed-style fields the visibility filter reads
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Style {
    pub display_none: bool,
    pub visibility_hidden: bool,
    /// Clipped away entirely (e.g. `clip: rect(0 0 0 0)`)
    pub clipped: bool,
    pub z_index: i32,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag_name: String,
    pub attributes: AHashMap<String, String>,
    pub text: String,
    pub rect: Rect,
    pub style: Style,
    pub has_click_handler: bool,
    pub scroll_height: f64,
    pub value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_lowercase(),
            attributes: AHashMap::new(),
            text: String::new(),
            rect: Rect::default(),
            style: Style::default(),
            has_click_handler: false,
            scroll_height: 0.0,
            value: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_lowercase(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn rect(mut self, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.rect = Rect::new(left, top, width, height);
        self
    }

    pub fn scroll_height(mut self, height: f64) -> Self {
        self.scroll_height = height;
        self
    }

    pub fn display_none(mut self) -> Self {
        self.style.display_none = true;
        self
    }

    pub fn visibility_hidden(mut self) -> Self {
        self.style.visibility_hidden = true;
        self
    }

    pub fn clipped(mut self) -> Self {
        self.style.clipped = true;
        self
    }

    pub fn z_index(mut self, z: i32) -> Self {
        self.style.z_index = z;
        self
    }

    pub fn on_click(mut self) -> Self {
        self.has_click_handler = true;
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name == tag_name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Something that happened to the document as a result of activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    Click(NodeId),
    Focus(NodeId),
    Input(NodeId),
    Submit(NodeId),
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    focused: Option<NodeId>,
    events: Vec<DomEvent>,
}

impl Document {
    /// New document holding only a `body` of the given size
    pub fn new(body_rect: Rect) -> Self {
        let mut body = Element::new("body");
        body.rect = body_rect;
        Self {
            nodes: vec![body],
            focused: None,
            events: Vec::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    /// All node ids in document (insertion) order, body first
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.get(id).and_then(Element::parent),
        }
    }

    /// Whether `node` is `ancestor` or lies beneath it
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Closest inclusive ancestor with the given tag name
    pub fn closest(&self, id: NodeId, tag_name: &str) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|n| self.get(*n).is_some_and(|e| e.is(tag_name)))
    }

    /// Whether the node belongs to the assistant's own subtree
    pub fn is_assistant_node(&self, id: NodeId) -> bool {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .any(|n| self.get(n).is_some_and(|e| e.get_attribute(AVA_ATTRIBUTE).is_some()))
    }

    /// Whether the node and all its ancestors are painted
    pub fn is_rendered(&self, id: NodeId) -> bool {
        std::iter::once(id).chain(self.ancestors(id)).all(|n| {
            self.get(n).is_some_and(|e| {
                !e.style.display_none && !e.style.visibility_hidden && !e.style.clipped
            })
        })
    }

    /// Topmost rendered element under the point
    pub fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        self.ids()
            .filter(|id| {
                self.get(*id).is_some_and(|e| e.rect.contains(x, y)) && self.is_rendered(*id)
            })
            .max_by_key(|id| (self.nodes[id.0].style.z_index, id.0))
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn click(&mut self, id: NodeId) {
        self.events.push(DomEvent::Click(id));
    }

    pub fn focus(&mut self, id: NodeId) {
        self.focused = Some(id);
        self.events.push(DomEvent::Focus(id));
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        if let Some(e) = self.get_mut(id) {
            e.value = value.to_string();
            self.events.push(DomEvent::Input(id));
        }
    }

    pub fn submit(&mut self, form: NodeId) {
        self.events.push(DomEvent::Submit(form));
    }

    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    /// Drain the events recorded so far
    pub fn take_events(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.events)
    }
}

pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.get(current).and_then(Element::parent);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new(Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    #[test]
    fn test_hit_testing_prefers_later_nodes() {
        let mut doc = doc();
        let body = doc.body();
        let below = doc.append(body, Element::new("div").rect(0.0, 0.0, 100.0, 100.0));
        let above = doc.append(body, Element::new("div").rect(50.0, 50.0, 100.0, 100.0));

        assert_eq!(doc.element_from_point(10.0, 10.0), Some(below));
        assert_eq!(doc.element_from_point(60.0, 60.0), Some(above));
        assert_eq!(doc.element_from_point(700.0, 500.0), Some(body));
    }

    #[test]
    fn test_z_index_beats_insertion_order() {
        let mut doc = doc();
        let body = doc.body();
        let raised = doc.append(body, Element::new("div").rect(0.0, 0.0, 100.0, 100.0).z_index(5));
        doc.append(body, Element::new("div").rect(0.0, 0.0, 100.0, 100.0));

        assert_eq!(doc.element_from_point(10.0, 10.0), Some(raised));
    }

    #[test]
    fn test_hidden_ancestor_hides_descendants() {
        let mut doc = doc();
        let body = doc.body();
        let wrapper = doc.append(body, Element::new("div").display_none());
        let link = doc.append(wrapper, Element::new("a").rect(0.0, 0.0, 10.0, 10.0));

        assert!(!doc.is_rendered(link));
        assert_eq!(doc.element_from_point(5.0, 5.0), Some(body));
    }

    #[test]
    fn test_take_events_drains() {
        let mut doc = doc();
        let body = doc.body();
        let input = doc.append(body, Element::new("input"));
        doc.focus(input);
        doc.set_value(input, "hi");

        assert_eq!(doc.take_events(), vec![DomEvent::Focus(input), DomEvent::Input(input)]);
        assert!(doc.events().is_empty());
        assert_eq!(doc.focused(), Some(input));
    }

    #[test]
    fn test_closest_and_assistant_subtree() {
        let mut doc = doc();
        let body = doc.body();
        let form = doc.append(body, Element::new("form"));
        let input = doc.append(form, Element::new("input"));
        let ava = doc.append(body, Element::new("div").attr(AVA_ATTRIBUTE, "true"));
        let badge = doc.append(ava, Element::new("span"));

        assert_eq!(doc.closest(input, "form"), Some(form));
        assert_eq!(doc.closest(badge, "form"), None);
        assert!(doc.is_assistant_node(badge));
        assert!(!doc.is_assistant_node(input));
    }
}
