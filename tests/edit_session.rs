//! Deck invariants under sequences of edits.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use wrapdeck::edit::{EditOutcome, EditSession, ElementPatch, Refusal};
use wrapdeck::model::{Deck, ElementKind, Point};
use wrapdeck::selection::Selection;

fn text(s: &str) -> ElementKind {
    ElementKind::Text { text: s.to_string() }
}

#[test]
fn deck_never_empties() {
    let mut deck = Deck::new();
    let mut selection = Selection::new();
    let mut edit = EditSession::new(&mut deck, &mut selection);
    for _ in 0..4 {
        edit.add_slide();
    }
    for i in [3, 0, 9, 1, 0, 0, 0] {
        edit.remove_slide(i);
        assert!(!edit.deck().is_empty());
    }
    assert_eq!(edit.deck().len(), 1);
    assert_eq!(edit.remove_slide(0), EditOutcome::Refused(Refusal::LastSlide));
}

#[test]
fn paint_order_is_stable() {
    let mut deck = Deck::new();
    let mut selection = Selection::new();
    let mut edit = EditSession::new(&mut deck, &mut selection);
    let ids: Vec<_> = (0..5).filter_map(|i| edit.add_element(text(&i.to_string())).created().cloned()).collect();
    for id in &ids {
        edit.update_element(id, ElementPatch { z_index: Some(100), ..ElementPatch::default() });
    }
    let slide = edit.deck().active_slide();
    let first: Vec<_> = slide.paint_order().iter().map(|e| e.id.clone()).collect();
    let second: Vec<_> = slide.paint_order().iter().map(|e| e.id.clone()).collect();
    assert_eq!(first, second);
    // Ties keep stored order
    assert_eq!(&first[first.len() - ids.len()..], ids.as_slice());
}

#[test]
fn watermark_never_decreases() {
    let mut deck = Deck::new();
    let mut selection = Selection::new();
    let mut edit = EditSession::new(&mut deck, &mut selection);
    let mut last = edit.deck().watermark();
    let mut check = |edit: &EditSession<'_>| {
        let now = edit.deck().watermark();
        assert!(now >= last, "watermark fell from {last} to {now}");
        last = now;
    };

    let a = edit.add_element(text("a")).created().cloned().unwrap();
    check(&edit);
    let b = edit.duplicate_element(&a).created().cloned().unwrap();
    check(&edit);
    edit.bring_to_front(&a);
    check(&edit);
    let mut order: Vec<_> = edit.deck().active_slide().elements.iter().map(|e| e.id.clone()).collect();
    order.reverse();
    edit.reorder_elements(&order);
    check(&edit);
    edit.send_to_back(&b);
    edit.add_element(text("c"));
    check(&edit);
}

#[test]
fn duplicate_lands_above_and_offset() {
    let mut deck = Deck::new();
    let mut selection = Selection::new();
    let mut edit = EditSession::new(&mut deck, &mut selection);
    let id = edit.add_element(text("hello")).created().cloned().unwrap();
    edit.move_element(&id, Point::new(40.0, 60.0));
    let clone_id = edit.duplicate_element(&id).created().cloned().unwrap();

    let slide = edit.deck().active_slide();
    let original = slide.element(&id).unwrap();
    let clone = slide.element(&clone_id).unwrap();
    assert!(clone.z_index > original.z_index);
    assert_eq!(clone.position, Point::new(60.0, 80.0));
    assert_eq!(clone.content(), "hello");
    assert_ne!(clone.id, original.id);
    assert_eq!(selection.get(), Some(&clone_id));
}
