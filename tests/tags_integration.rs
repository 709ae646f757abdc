//! Tag overlay tests against hand-built documents

use ava::core::types::Viewport;
use ava::tags::{
    should_recompute, Document, Element, Mutation, TagOverlay, TagScanner, AVA_ATTRIBUTE,
};
use ava::ui::UiState;

fn viewport() -> Viewport {
    Viewport::new(1024.0, 768.0)
}

fn scanner() -> TagScanner {
    TagScanner::new(20.0, 16.0)
}

#[test]
fn test_mixed_page_indexes_in_document_order() {
    let mut doc = Document::new(viewport().rect());
    let body = doc.body();
    doc.append(body, Element::new("a").text("News").rect(10.0, 10.0, 80.0, 20.0));
    doc.append(body, Element::new("p").text("Plain text").rect(10.0, 40.0, 300.0, 20.0));
    doc.append(body, Element::new("div").on_click().text("Card").rect(10.0, 80.0, 200.0, 100.0));
    doc.append(
        body,
        Element::new("div").attr("role", "switch").attr("aria-label", "Dark mode").rect(
            300.0, 80.0, 40.0, 20.0,
        ),
    );
    doc.append(body, Element::new("textarea").attr("placeholder", "Notes").rect(10.0, 200.0, 300.0, 80.0));

    let tags = scanner().scan(&doc, viewport());
    let texts: Vec<_> = tags.iter().map(|t| t.display_text.as_str()).collect();
    assert_eq!(texts, vec!["News", "Card", "Dark mode", "Notes"]);
    let indexes: Vec<_> = tags.iter().map(|t| t.index).collect();
    assert_eq!(indexes, vec![1, 2, 3, 4]);
    assert_eq!(tags[2].id, "ava-tag-3");
}

#[test]
fn test_hidden_and_offscreen_elements_excluded() {
    let mut doc = Document::new(viewport().rect());
    let body = doc.body();
    doc.append(body, Element::new("a").text("Gone").display_none().rect(10.0, 10.0, 80.0, 20.0));
    doc.append(body, Element::new("a").text("Invisible").visibility_hidden().rect(10.0, 40.0, 80.0, 20.0));
    doc.append(body, Element::new("a").text("Below").rect(10.0, 2000.0, 80.0, 20.0));
    doc.append(body, Element::new("a").text("Empty").rect(10.0, 70.0, 0.0, 0.0));
    let hidden_parent = doc.append(body, Element::new("section").clipped().rect(0.0, 100.0, 500.0, 100.0));
    doc.append(hidden_parent, Element::new("button").text("Clipped").rect(10.0, 110.0, 80.0, 20.0));
    doc.append(body, Element::new("a").text("Shown").rect(10.0, 300.0, 80.0, 20.0));

    let tags = scanner().scan(&doc, viewport());
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].display_text, "Shown");
}

#[test]
fn test_fully_covered_element_excluded() {
    let mut doc = Document::new(viewport().rect());
    let body = doc.body();
    doc.append(body, Element::new("button").text("Behind").rect(100.0, 100.0, 80.0, 30.0));
    doc.append(body, Element::new("div").rect(50.0, 50.0, 300.0, 300.0));

    assert!(scanner().scan(&doc, viewport()).is_empty());
}

#[test]
fn test_partially_covered_element_kept() {
    let mut doc = Document::new(viewport().rect());
    let body = doc.body();
    doc.append(body, Element::new("button").text("Peeking").rect(100.0, 100.0, 80.0, 30.0));
    doc.append(body, Element::new("div").rect(50.0, 50.0, 100.0, 300.0));

    let tags = scanner().scan(&doc, viewport());
    assert_eq!(tags.len(), 1);
}

#[test]
fn test_badge_placement() {
    let scanner = scanner();
    let mut doc = Document::new(viewport().rect());
    let body = doc.body();
    doc.append(body, Element::new("a").text("Edge").rect(0.0, 0.0, 100.0, 40.0));
    doc.append(body, Element::new("a").text("Middle").rect(200.0, 200.0, 100.0, 40.0));
    doc.append(body, Element::new("input").attr("type", "checkbox").rect(400.0, 400.0, 12.0, 12.0));

    let tags = scanner.scan(&doc, viewport());
    assert_eq!(tags[0].badge, (0.0, 0.0));
    assert_eq!(tags[1].badge, (190.0, 192.0));
    assert_eq!(tags[2].badge, (400.0, 400.0));
}

#[test]
fn test_modal_lists_tags_while_open() {
    let mut doc = Document::new(viewport().rect());
    let body = doc.body();
    doc.append(body, Element::new("a").text("One").rect(10.0, 10.0, 80.0, 20.0));
    doc.append(body, Element::new("a").text("Two").rect(10.0, 40.0, 80.0, 20.0));

    let mut ui = UiState::new();
    let mut overlay = TagOverlay::new(scanner());
    overlay.sync(&mut ui, &mut doc, viewport());
    assert!(overlay.modal_entries().is_empty());

    ui.modal_options().open_tag_modal();
    overlay.sync(&mut ui, &mut doc, viewport());
    assert_eq!(overlay.modal_entries(), vec!["1. One", "2. Two"]);
}

#[test]
fn test_pending_dictation_waits_for_focus() {
    let mut doc = Document::new(viewport().rect());
    let body = doc.body();
    let input = doc.append(body, Element::new("input").rect(10.0, 10.0, 200.0, 24.0));

    let mut ui = UiState::new();
    let mut overlay = TagOverlay::new(scanner());
    ui.set_dictation("hello there");
    overlay.sync(&mut ui, &mut doc, viewport());
    assert_eq!(ui.dictation(), Some("hello there"));

    ui.set_show_tag(true);
    ui.set_context_index(1);
    overlay.sync(&mut ui, &mut doc, viewport());
    assert_eq!(doc.get(input).unwrap().value, "hello there");
    assert_eq!(ui.dictation(), None);
}

#[test]
fn test_mutations_inside_assistant_are_ignored() {
    let mut doc = Document::new(viewport().rect());
    let body = doc.body();
    let root = doc.append(body, Element::new("div").attr(AVA_ATTRIBUTE, "root"));
    let badge = doc.append(root, Element::new("span"));
    let list = doc.append(body, Element::new("ul"));
    let item = doc.append(list, Element::new("li"));

    assert!(!should_recompute(&doc, &Mutation { target: badge }, true));
    assert!(should_recompute(&doc, &Mutation { target: item }, true));
    assert!(!should_recompute(&doc, &Mutation { target: item }, false));
}
