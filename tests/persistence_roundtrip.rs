//! Saving and loading decks through the directory-backed store.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use wrapdeck::constants::share::WORKING_DECK_KEY;
use wrapdeck::edit::{EditOutcome, EditSession, ElementPatch, Refusal};
use wrapdeck::model::{
    AnimationIn, AnimationOut, Background, Deck, Element, ElementKind, ElementType, Point, Size, Slide, Style,
};
use wrapdeck::selection::Selection;
use wrapdeck::storage::{self, DeckStore, FileStore, HydrateSource, MemoryStore};

fn one_of_each_kind() -> Deck {
    let mut slide = Slide::new(Background::gradient("linear-gradient(#000, #111)"), 7);
    slide.canvas_width = Some(1080);
    slide.canvas_height = Some(1920);
    for (i, kind) in ElementType::all().iter().enumerate() {
        let content = match kind {
            ElementType::Image => "https://example.com/a.png".to_string(),
            ElementType::Video => "https://example.com/a.mp4".to_string(),
            ElementType::Shape => r#"<circle cx="50" cy="50" r="40" fill="currentColor"/>"#.to_string(),
            other => format!("{} text", other.name()),
        };
        let z = i64::try_from(i).unwrap() + 1;
        let mut el = Element::new(
            ElementKind::from_parts(*kind, content),
            Point::new(10.0 * z as f64, 20.0),
            Size::new(300.0, 120.5),
            z,
        );
        if *kind == ElementType::Value {
            el.style = Style {
                rotation: Some(-12.5),
                opacity: Some(0.75),
                color: Some("#10b981".into()),
                background_color: Some("rgba(0,0,0,0.4)".into()),
                padding: Some(24.0),
                border_radius: Some(16.0),
                box_shadow: Some("0 4px 12px rgba(0,0,0,0.3)".into()),
                backdrop_blur: Some(8.0),
                filter: Some("sepia(0.5) contrast(0.9) brightness(0.9)".into()),
            };
        }
        let ins = AnimationIn::all();
        let outs = AnimationOut::all();
        el.animation_in = ins[i % ins.len()];
        el.animation_out = outs[i % outs.len()];
        slide.elements.push(el);
    }
    Deck::from_slides(vec![slide]).unwrap()
}

#[test]
fn deck_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path(), 28);
    let deck = one_of_each_kind();

    storage::save_deck(&mut store, WORKING_DECK_KEY, &deck).unwrap();
    let hydrated = storage::load_deck(&store, WORKING_DECK_KEY).unwrap();

    assert_eq!(hydrated.source, HydrateSource::Loaded);
    assert_eq!(hydrated.deck.slides(), deck.slides());
}

#[test]
fn share_link_resolves_to_the_saved_deck() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path(), 28);
    let deck = one_of_each_kind();

    let share = storage::save_deck(&mut store, WORKING_DECK_KEY, &deck).unwrap();
    let shared = storage::load_shared(&store, &share).unwrap();
    assert_eq!(shared.deck.slides(), deck.slides());
}

#[test]
fn unset_style_attributes_are_not_written() {
    let deck = one_of_each_kind();
    let json = storage::encode(&deck).unwrap();
    assert!(!json.contains("null"));
    for key in [
        "rotation",
        "opacity",
        "color",
        "backgroundColor",
        "padding",
        "borderRadius",
        "boxShadow",
        "backdropBlur",
        "filter",
    ] {
        assert!(json.contains(&format!("\"{key}\"")), "{key} missing from {json}");
    }
}

#[test]
fn fixture_covers_every_animation() {
    let deck = one_of_each_kind();
    let elements = &deck.active_slide().elements;
    for a in AnimationIn::all() {
        assert!(elements.iter().any(|e| e.animation_in == *a), "{a:?} unused");
    }
    for a in AnimationOut::all() {
        assert!(elements.iter().any(|e| e.animation_out == *a), "{a:?} unused");
    }
}

#[test]
fn non_finite_input_never_reaches_storage() {
    let mut deck = Deck::new();
    let mut selection = Selection::new();
    let mut edit = EditSession::new(&mut deck, &mut selection);
    let id = edit.add_element(ElementKind::Text { text: "hi".into() }).created().cloned().unwrap();

    assert_eq!(
        edit.move_element(&id, Point::new(f64::NAN, 5.0)),
        EditOutcome::Refused(Refusal::NonFiniteNumber)
    );
    assert_eq!(
        edit.update_element(&id, ElementPatch { rotation: Some(f64::INFINITY), ..ElementPatch::default() }),
        EditOutcome::Refused(Refusal::NonFiniteNumber)
    );
    edit.add_slide();

    let mut store = MemoryStore::new();
    storage::save_deck(&mut store, WORKING_DECK_KEY, &deck).unwrap();
    assert!(!storage::encode(&deck).unwrap().contains("null"));
    let hydrated = storage::load_deck(&store, WORKING_DECK_KEY).unwrap();
    assert_eq!(hydrated.source, HydrateSource::Loaded);
    assert_eq!(hydrated.deck.slides(), deck.slides());
}

#[test]
fn broken_file_falls_back_to_a_fresh_deck() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path(), 28);
    store.save(WORKING_DECK_KEY, "{ not json").unwrap();

    let hydrated = storage::load_deck(&store, WORKING_DECK_KEY).unwrap();
    assert!(hydrated.is_fallback());
    assert_eq!(hydrated.deck.len(), 1);
}

#[test]
fn missing_deck_is_reported_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path(), 28);
    let hydrated = storage::load_deck(&store, WORKING_DECK_KEY).unwrap();
    assert_eq!(hydrated.source, HydrateSource::Missing);
}
