//! Structural edits to a deck.
//!
//! An [`EditSession`] borrows the deck and the selection for the duration of
//! one user action. Every operation is atomic and reports an [`EditOutcome`];
//! stale ids, removing the last slide and invalid durations are refused
//! without touching the deck.

use crate::media::MediaRef;
use crate::model::{
    AnimationIn, AnimationOut, Background, Deck, Element, ElementKind, Point, Size,
};
use crate::presets;
use crate::selection::Selection;
use crate::shapes;
use crate::types::ElementId;
use crate::constants::edit::{
    DUPLICATE_OFFSET, NEW_ELEMENT_POSITION, NEW_ELEMENT_SIZE, NEW_TEXT_SIZE,
};

/// Why an edit was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    /// No element with this id on the active slide.
    UnknownElement(ElementId),
    /// No slide at this index.
    UnknownSlide(usize),
    /// The deck must keep at least one slide.
    LastSlide,
    /// Durations must be positive.
    InvalidDuration,
    /// A reorder list must name every element of the slide exactly once.
    OrderMismatch,
    /// Shape markup that is not well-formed, or an unknown catalog name.
    InvalidShape(String),
    /// Geometry and style numbers must be finite.
    NonFiniteNumber,
}

impl std::fmt::Display for Refusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownElement(id) => write!(f, "element {id} is not on this slide"),
            Self::UnknownSlide(index) => write!(f, "there is no slide {}", index + 1),
            Self::LastSlide => write!(f, "a deck needs at least one slide"),
            Self::InvalidDuration => write!(f, "duration must be at least one second"),
            Self::OrderMismatch => write!(f, "layer order must list every element once"),
            Self::InvalidShape(reason) => write!(f, "{reason}"),
            Self::NonFiniteNumber => write!(f, "numbers must be finite"),
        }
    }
}

/// Result of an edit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The deck was modified.
    Applied,
    /// A new element was created and selected.
    Created(ElementId),
    /// Nothing changed.
    Refused(Refusal),
}

impl EditOutcome {
    /// Whether the deck changed.
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Refused(_))
    }

    /// Id of the created element, if any.
    pub fn created(&self) -> Option<&ElementId> {
        match self {
            Self::Created(id) => Some(id),
            _ => None,
        }
    }

    fn refuse(refusal: Refusal) -> Self {
        tracing::debug!(?refusal, "Edit refused");
        Self::Refused(refusal)
    }
}

/// Partial element update. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    /// New content, keeping the kind.
    pub content: Option<String>,
    /// New top-left corner.
    pub position: Option<Point>,
    /// New extent.
    pub size: Option<Size>,
    /// Explicit z-index.
    pub z_index: Option<i64>,
    /// Rotation in degrees.
    pub rotation: Option<f64>,
    /// Target opacity.
    pub opacity: Option<f64>,
    /// Foreground color.
    pub color: Option<String>,
    /// Background fill.
    pub background_color: Option<String>,
    /// Inner padding.
    pub padding: Option<f64>,
    /// Corner radius.
    pub border_radius: Option<f64>,
    /// Shadow.
    pub box_shadow: Option<String>,
    /// Backdrop blur.
    pub backdrop_blur: Option<f64>,
    /// Filter chain.
    pub filter: Option<String>,
    /// Enter animation.
    pub animation_in: Option<AnimationIn>,
    /// Exit animation.
    pub animation_out: Option<AnimationOut>,
}

impl ElementPatch {
    /// Patch that moves an element.
    pub fn moved_to(position: Point) -> Self {
        Self { position: Some(position), ..Self::default() }
    }

    /// Patch that resizes an element.
    pub fn resized(size: Size) -> Self {
        Self { size: Some(size), ..Self::default() }
    }

    /// Patch that replaces content.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Self::default() }
    }

    // NaN and infinities cannot be stored: JSON writes them as null.
    fn is_finite(&self) -> bool {
        let point = self.position.iter().flat_map(|p| [p.x, p.y]);
        let size = self.size.iter().flat_map(|s| [s.width, s.height]);
        let style = [self.rotation, self.opacity, self.padding, self.border_radius, self.backdrop_blur];
        point.chain(size).chain(style.into_iter().flatten()).all(f64::is_finite)
    }

    fn apply(self, el: &mut Element) {
        if let Some(content) = self.content {
            el.kind.set_content(content);
        }
        if let Some(p) = self.position {
            el.position = p;
        }
        if let Some(s) = self.size {
            el.size = Size::new(s.width.max(1.0), s.height.max(1.0));
        }
        if let Some(z) = self.z_index {
            el.z_index = z;
        }
        let style = &mut el.style;
        style.rotation = self.rotation.or(style.rotation.take());
        style.opacity = self.opacity.map(|o| o.clamp(0.0, 1.0)).or(style.opacity.take());
        style.color = self.color.or(style.color.take());
        style.background_color = self.background_color.or(style.background_color.take());
        style.padding = self.padding.or(style.padding.take());
        style.border_radius = self.border_radius.or(style.border_radius.take());
        style.box_shadow = self.box_shadow.or(style.box_shadow.take());
        style.backdrop_blur = self.backdrop_blur.or(style.backdrop_blur.take());
        style.filter = self.filter.or(style.filter.take());
        if let Some(a) = self.animation_in {
            el.animation_in = a;
        }
        if let Some(a) = self.animation_out {
            el.animation_out = a;
        }
    }
}

/// Partial update of the active slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlidePatch {
    /// New background.
    pub background: Option<Background>,
    /// New dwell time in seconds; must be positive.
    pub duration: Option<u32>,
    /// New canvas width.
    pub canvas_width: Option<u32>,
    /// New canvas height.
    pub canvas_height: Option<u32>,
}

/// Mutations over a deck and its selection.
pub struct EditSession<'a> {
    deck: &'a mut Deck,
    selection: &'a mut Selection,
}

impl<'a> EditSession<'a> {
    /// Start an edit session.
    pub fn new(deck: &'a mut Deck, selection: &'a mut Selection) -> Self {
        Self { deck, selection }
    }

    /// The deck being edited.
    pub fn deck(&self) -> &Deck {
        self.deck
    }

    /// Add an element of the given kind on top of the active slide and select it.
    pub fn add_element(&mut self, kind: ElementKind) -> EditOutcome {
        let is_text = matches!(kind, ElementKind::Text { .. });
        let is_shape = matches!(kind, ElementKind::Shape { .. });
        let (w, h) = if is_text { NEW_TEXT_SIZE } else { NEW_ELEMENT_SIZE };
        let z = self.deck.allocate_top_z();
        let mut el = Element::new(
            kind,
            Point::new(NEW_ELEMENT_POSITION.0, NEW_ELEMENT_POSITION.1),
            Size::new(w, h),
            z,
        );
        el.style.color = Some(if is_shape { "#8b5cf6" } else { "#ffffff" }.to_string());
        el.animation_in = AnimationIn::Fade;
        el.animation_out = AnimationOut::None;

        let id = el.id.clone();
        tracing::debug!(element = %id, kind = el.element_type().name(), z, "Element added");
        self.deck.active_slide_mut().elements.push(el);
        self.selection.select(id.clone());
        EditOutcome::Created(id)
    }

    /// Add an image or video produced by the media collaborator.
    pub fn add_media(&mut self, media: MediaRef) -> EditOutcome {
        self.add_element(media.into_kind())
    }

    /// Add a shape from the catalog by (fuzzy) name.
    pub fn add_shape(&mut self, name: &str) -> EditOutcome {
        match presets::find_shape(name) {
            Some(shape) => self.add_element(ElementKind::Shape { markup: shape.markup.to_string() }),
            None => EditOutcome::refuse(Refusal::InvalidShape(format!("no shape named {name:?}"))),
        }
    }

    /// Add a shape from raw markup, e.g. an accepted assistant suggestion.
    pub fn add_shape_markup(&mut self, markup: &str) -> EditOutcome {
        match shapes::normalize_markup(markup) {
            Ok(markup) => self.add_element(ElementKind::Shape { markup }),
            Err(e) => EditOutcome::refuse(Refusal::InvalidShape(e.to_string())),
        }
    }

    /// Merge fields into an element. Stale ids are a refused no-op.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> EditOutcome {
        if !patch.is_finite() {
            return EditOutcome::refuse(Refusal::NonFiniteNumber);
        }
        let raised = patch.z_index;
        let Some(el) = self.deck.active_slide_mut().element_mut(id) else {
            return EditOutcome::refuse(Refusal::UnknownElement(id.clone()));
        };
        patch.apply(el);
        if let Some(z) = raised {
            self.deck.raise_watermark(z);
        }
        EditOutcome::Applied
    }

    /// Move an element to a new position.
    pub fn move_element(&mut self, id: &ElementId, position: Point) -> EditOutcome {
        self.update_element(id, ElementPatch::moved_to(position))
    }

    /// Resize an element. Extents are kept at least one unit.
    pub fn resize_element(&mut self, id: &ElementId, size: Size) -> EditOutcome {
        self.update_element(id, ElementPatch::resized(size))
    }

    /// Apply a named filter preset.
    pub fn apply_filter(&mut self, id: &ElementId, preset: &str) -> EditOutcome {
        let Some(filter) = presets::find_filter(preset) else {
            return EditOutcome::refuse(Refusal::InvalidShape(format!("no filter named {preset:?}")));
        };
        self.update_element(
            id,
            ElementPatch { filter: Some(filter.value.to_string()), ..ElementPatch::default() },
        )
    }

    /// Remove an element; clears the selection if it was selected.
    pub fn remove_element(&mut self, id: &ElementId) -> EditOutcome {
        let elements = &mut self.deck.active_slide_mut().elements;
        let Some(pos) = elements.iter().position(|e| &e.id == id) else {
            return EditOutcome::refuse(Refusal::UnknownElement(id.clone()));
        };
        elements.remove(pos);
        self.selection.forget(id);
        tracing::debug!(element = %id, "Element removed");
        EditOutcome::Applied
    }

    /// Clone an element with a fresh id, offset and a new top z-index; select the clone.
    pub fn duplicate_element(&mut self, id: &ElementId) -> EditOutcome {
        let Some(original) = self.deck.active_slide().element(id).cloned() else {
            return EditOutcome::refuse(Refusal::UnknownElement(id.clone()));
        };
        let z = self.deck.allocate_top_z();
        let clone = Element {
            id: ElementId::generate(),
            position: original.position.offset(DUPLICATE_OFFSET, DUPLICATE_OFFSET),
            z_index: z,
            ..original
        };
        let new_id = clone.id.clone();
        tracing::debug!(from = %id, to = %new_id, z, "Element duplicated");
        self.deck.active_slide_mut().elements.push(clone);
        self.selection.select(new_id.clone());
        EditOutcome::Created(new_id)
    }

    /// Give an element a new top-most z-index.
    pub fn bring_to_front(&mut self, id: &ElementId) -> EditOutcome {
        if !self.deck.active_slide().contains(id) {
            return EditOutcome::refuse(Refusal::UnknownElement(id.clone()));
        }
        let z = self.deck.allocate_top_z();
        self.set_z(id, z)
    }

    /// Place an element below everything else (and below zero).
    pub fn send_to_back(&mut self, id: &ElementId) -> EditOutcome {
        let slide = self.deck.active_slide();
        if !slide.contains(id) {
            return EditOutcome::refuse(Refusal::UnknownElement(id.clone()));
        }
        let z = slide.min_z().unwrap_or(0).min(0) - 1;
        self.set_z(id, z)
    }

    fn set_z(&mut self, id: &ElementId, z: i64) -> EditOutcome {
        if let Some(el) = self.deck.active_slide_mut().element_mut(id) {
            el.z_index = z;
            tracing::debug!(element = %id, z, "Element re-layered");
        }
        EditOutcome::Applied
    }

    /// Renumber the slide densely from a bottom-to-top list of every element id.
    pub fn reorder_elements(&mut self, bottom_to_top: &[ElementId]) -> EditOutcome {
        let slide = self.deck.active_slide_mut();
        let unique: std::collections::HashSet<&ElementId> = bottom_to_top.iter().collect();
        if bottom_to_top.len() != slide.elements.len()
            || unique.len() != bottom_to_top.len()
            || !bottom_to_top.iter().all(|id| slide.contains(id))
        {
            return EditOutcome::refuse(Refusal::OrderMismatch);
        }

        let mut remaining = std::mem::take(&mut slide.elements);
        for (idx, id) in bottom_to_top.iter().enumerate() {
            if let Some(pos) = remaining.iter().position(|e| &e.id == id) {
                let mut el = remaining.swap_remove(pos);
                el.z_index = idx as i64 + 1;
                slide.elements.push(el);
            }
        }
        let len = bottom_to_top.len() as i64;
        self.deck.raise_watermark(len + 1);
        tracing::debug!(count = len, "Elements reordered");
        EditOutcome::Applied
    }

    /// Select an element on the active slide.
    pub fn select_element(&mut self, id: &ElementId) -> EditOutcome {
        if !self.deck.active_slide().contains(id) {
            return EditOutcome::refuse(Refusal::UnknownElement(id.clone()));
        }
        self.selection.select(id.clone());
        EditOutcome::Applied
    }

    /// Background click.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Append a default slide and make it active.
    pub fn add_slide(&mut self) -> EditOutcome {
        let index = self.deck.push_slide(presets::new_slide());
        self.deck.set_active_index(index);
        self.selection.clear();
        tracing::debug!(index, "Slide added");
        EditOutcome::Applied
    }

    /// Remove a slide. The last remaining slide cannot be removed.
    pub fn remove_slide(&mut self, index: usize) -> EditOutcome {
        if index >= self.deck.len() {
            return EditOutcome::refuse(Refusal::UnknownSlide(index));
        }
        if self.deck.len() == 1 {
            return EditOutcome::refuse(Refusal::LastSlide);
        }
        let before = self.deck.active_slide().id.clone();
        if self.deck.remove_slide(index).is_none() {
            return EditOutcome::refuse(Refusal::LastSlide);
        }
        if self.deck.active_slide().id != before {
            self.selection.clear();
        }
        tracing::debug!(index, remaining = self.deck.len(), "Slide removed");
        EditOutcome::Applied
    }

    /// Make another slide active.
    pub fn select_slide(&mut self, index: usize) -> EditOutcome {
        if index >= self.deck.len() {
            return EditOutcome::refuse(Refusal::UnknownSlide(index));
        }
        if index != self.deck.active_index() {
            self.deck.set_active_index(index);
            self.selection.clear();
        }
        EditOutcome::Applied
    }

    /// Update the active slide's background, duration or canvas.
    pub fn update_slide(&mut self, patch: SlidePatch) -> EditOutcome {
        if patch.duration == Some(0) {
            return EditOutcome::refuse(Refusal::InvalidDuration);
        }
        let slide = self.deck.active_slide_mut();
        if let Some(bg) = patch.background {
            slide.background = bg;
        }
        if let Some(d) = patch.duration {
            slide.duration = d;
        }
        if let Some(w) = patch.canvas_width.filter(|w| *w > 0) {
            slide.canvas_width = Some(w);
        }
        if let Some(h) = patch.canvas_height.filter(|h| *h > 0) {
            slide.canvas_height = Some(h);
        }
        EditOutcome::Applied
    }

    /// Replace the deck contents with the demo slides.
    pub fn load_demo(&mut self) -> EditOutcome {
        self.deck.replace_slides(presets::demo_slides());
        self.selection.clear();
        tracing::info!(slides = self.deck.len(), "Demo deck loaded");
        EditOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn text(s: &str) -> ElementKind {
        ElementKind::Text { text: s.to_string() }
    }

    #[test]
    fn add_element_goes_on_top_and_is_selected() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let id = edit.add_element(text("hi")).created().cloned().unwrap();
        let slide = edit.deck().active_slide();
        let el = slide.element(&id).unwrap();
        assert_eq!(el.z_index, 21);
        assert_eq!(el.size, Size::new(400.0, 100.0));
        assert_eq!(el.style.color.as_deref(), Some("#ffffff"));
        assert_eq!(slide.paint_order().last().map(|e| &e.id), Some(&id));
        assert!(sel.is_selected(&id));
    }

    #[test]
    fn shapes_get_shape_defaults() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let id = edit.add_shape("star").created().cloned().unwrap();
        let el = edit.deck().active_slide().element(&id).unwrap();
        assert_eq!(el.size, Size::new(200.0, 200.0));
        assert_eq!(el.style.color.as_deref(), Some("#8b5cf6"));
    }

    #[test]
    fn update_unknown_element_is_noop() {
        let mut deck = Deck::new();
        let snapshot = deck.clone();
        let mut sel = Selection::new();
        let outcome = EditSession::new(&mut deck, &mut sel)
            .update_element(&ElementId::new("gone"), ElementPatch::with_content("x"));
        assert!(matches!(outcome, EditOutcome::Refused(Refusal::UnknownElement(_))));
        assert_eq!(deck, snapshot);
    }

    #[test]
    fn update_merges_fields() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let id = edit.add_element(text("a")).created().cloned().unwrap();
        edit.update_element(&id, ElementPatch { opacity: Some(0.5), ..ElementPatch::default() });
        edit.update_element(&id, ElementPatch::with_content("b"));
        let el = edit.deck().active_slide().element(&id).unwrap();
        assert_eq!(el.content(), "b");
        assert_eq!(el.style.opacity, Some(0.5));
        assert_eq!(el.style.color.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn explicit_z_raises_watermark() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let id = edit.add_element(text("a")).created().cloned().unwrap();
        edit.update_element(&id, ElementPatch { z_index: Some(500), ..ElementPatch::default() });
        let next = edit.add_element(text("b")).created().cloned().unwrap();
        assert_eq!(edit.deck().active_slide().element(&next).map(|e| e.z_index), Some(501));
    }

    #[test]
    fn remove_clears_selection() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let id = edit.add_element(text("a")).created().cloned().unwrap();
        assert!(edit.remove_element(&id).is_applied());
        assert!(!edit.remove_element(&id).is_applied());
        assert!(sel.is_empty());
    }

    #[test]
    fn send_to_back_goes_below_zero() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let id = edit.add_element(text("a")).created().cloned().unwrap();
        edit.send_to_back(&id);
        let slide = edit.deck().active_slide();
        assert_eq!(slide.element(&id).map(|e| e.z_index), Some(-1));
        assert_eq!(slide.paint_order().first().map(|e| &e.id), Some(&id));
        edit.send_to_back(&id);
        assert_eq!(edit.deck().active_slide().element(&id).map(|e| e.z_index), Some(-2));
    }

    #[test]
    fn bring_to_front_uses_watermark() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let first = edit.deck().active_slide().elements[5].id.clone();
        edit.add_element(text("top"));
        edit.bring_to_front(&first);
        let slide = edit.deck().active_slide();
        assert_eq!(slide.element(&first).map(|e| e.z_index), Some(22));
        assert_eq!(slide.paint_order().last().map(|e| &e.id), Some(&first));
    }

    #[test]
    fn reorder_renumbers_densely() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let mut ids: Vec<ElementId> =
            edit.deck().active_slide().paint_order().iter().map(|e| e.id.clone()).collect();
        ids.reverse();
        assert!(edit.reorder_elements(&ids).is_applied());
        let slide = edit.deck().active_slide();
        let zs: Vec<i64> = ids.iter().filter_map(|id| slide.element(id)).map(|e| e.z_index).collect();
        assert_eq!(zs, vec![1, 2, 3, 4, 5, 6]);
        assert!(edit.deck().watermark() >= 7);
    }

    #[test]
    fn reorder_rejects_partial_lists() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let one = vec![edit.deck().active_slide().elements[0].id.clone()];
        assert_eq!(edit.reorder_elements(&one), EditOutcome::Refused(Refusal::OrderMismatch));
        let mut dup: Vec<ElementId> =
            edit.deck().active_slide().elements.iter().map(|e| e.id.clone()).collect();
        dup[1] = dup[0].clone();
        assert_eq!(edit.reorder_elements(&dup), EditOutcome::Refused(Refusal::OrderMismatch));
    }

    #[test]
    fn slide_switch_clears_selection() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        edit.add_element(text("a"));
        edit.add_slide();
        assert_eq!(edit.deck().active_index(), 1);
        assert!(sel.is_empty());
    }

    #[test]
    fn remove_slide_refuses_last_and_clamps() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        assert_eq!(edit.remove_slide(0), EditOutcome::Refused(Refusal::LastSlide));
        edit.add_slide();
        assert_eq!(edit.remove_slide(5), EditOutcome::Refused(Refusal::UnknownSlide(5)));
        assert!(edit.remove_slide(1).is_applied());
        assert_eq!(edit.deck().active_index(), 0);
        assert_eq!(edit.deck().len(), 1);
    }

    #[test]
    fn non_finite_numbers_are_refused() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let id = edit.add_element(text("a")).created().cloned().unwrap();
        let before = edit.deck().active_slide().element(&id).cloned().unwrap();

        let refused = EditOutcome::Refused(Refusal::NonFiniteNumber);
        assert_eq!(edit.resize_element(&id, Size::new(f64::INFINITY, 1.0)), refused);
        let opacity = ElementPatch { opacity: Some(f64::NAN), ..ElementPatch::default() };
        assert_eq!(edit.update_element(&id, opacity), refused);
        let blur = ElementPatch { backdrop_blur: Some(f64::NEG_INFINITY), ..ElementPatch::default() };
        assert_eq!(edit.update_element(&id, blur), refused);
        assert_eq!(edit.deck().active_slide().element(&id), Some(&before));
    }

    #[test]
    fn zero_duration_is_refused() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let outcome = edit.update_slide(SlidePatch { duration: Some(0), ..SlidePatch::default() });
        assert_eq!(outcome, EditOutcome::Refused(Refusal::InvalidDuration));
        edit.update_slide(SlidePatch { duration: Some(12), ..SlidePatch::default() });
        assert_eq!(edit.deck().active_slide().duration, 12);
    }

    #[test]
    fn filter_preset_is_applied() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        let id = edit.add_element(text("a")).created().cloned().unwrap();
        assert!(edit.apply_filter(&id, "Vintage").is_applied());
        let el = edit.deck().active_slide().element(&id).unwrap();
        assert_eq!(el.style.filter.as_deref(), Some("sepia(0.5) contrast(0.9) brightness(0.9)"));
    }

    #[test]
    fn malformed_markup_is_refused() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let outcome = EditSession::new(&mut deck, &mut sel).add_shape_markup("<circle cx=\"1\"");
        assert!(matches!(outcome, EditOutcome::Refused(Refusal::InvalidShape(_))));
    }

    #[test]
    fn demo_replaces_slides() {
        let mut deck = Deck::new();
        let mut sel = Selection::new();
        let mut edit = EditSession::new(&mut deck, &mut sel);
        edit.load_demo();
        assert_eq!(edit.deck().len(), 3);
        assert_eq!(edit.deck().active_index(), 0);
    }
}
