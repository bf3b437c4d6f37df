//! The deck: a non-empty sequence of slides plus the active-slide cursor.
//!
//! Fields are private so the invariants hold for every caller:
//! there is always at least one slide, the active index is in range, and
//! the z-index watermark never decreases.

use super::slide::Slide;
use crate::constants;
use crate::presets;

/// Ordered slides, the active slide pointer and the z-index watermark.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    slides: Vec<Slide>,
    active_index: usize,
    z_watermark: i64,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// A deck seeded with one default slide.
    pub fn new() -> Self {
        Self {
            slides: vec![presets::new_slide()],
            active_index: 0,
            z_watermark: constants::edit::INITIAL_Z_WATERMARK,
        }
    }

    /// Build a deck from existing slides. Returns `None` for an empty list.
    ///
    /// The watermark starts at the highest z-index present (or the initial
    /// watermark, whichever is larger), so new elements land on top.
    pub fn from_slides(slides: Vec<Slide>) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        let top = slides.iter().filter_map(Slide::max_z).max().unwrap_or(i64::MIN);
        Some(Self {
            slides,
            active_index: 0,
            z_watermark: top.max(constants::edit::INITIAL_Z_WATERMARK),
        })
    }

    /// All slides in order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides; never zero.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the active slide.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// The active slide.
    pub fn active_slide(&self) -> &Slide {
        &self.slides[self.active_index]
    }

    /// Slide at `index`.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Whether the active slide is the final one.
    pub fn is_last(&self) -> bool {
        self.active_index + 1 >= self.slides.len()
    }

    /// Current z-index watermark.
    pub fn watermark(&self) -> i64 {
        self.z_watermark
    }

    pub(crate) fn active_slide_mut(&mut self) -> &mut Slide {
        &mut self.slides[self.active_index]
    }

    /// Move the cursor; out-of-range indices are clamped to the last slide.
    pub(crate) fn set_active_index(&mut self, index: usize) {
        self.active_index = index.min(self.slides.len() - 1);
    }

    /// Reserve the next top-most z-index.
    pub(crate) fn allocate_top_z(&mut self) -> i64 {
        self.z_watermark += 1;
        self.z_watermark
    }

    /// Raise the watermark to at least `floor`.
    pub(crate) fn raise_watermark(&mut self, floor: i64) {
        self.z_watermark = self.z_watermark.max(floor);
    }

    pub(crate) fn push_slide(&mut self, slide: Slide) -> usize {
        self.slides.push(slide);
        self.slides.len() - 1
    }

    /// Remove a slide unless it is the last one left.
    pub(crate) fn remove_slide(&mut self, index: usize) -> Option<Slide> {
        if self.slides.len() <= 1 || index >= self.slides.len() {
            return None;
        }
        let removed = self.slides.remove(index);
        if self.active_index >= self.slides.len() {
            self.active_index = self.slides.len() - 1;
        }
        Some(removed)
    }

    /// Swap in a new slide list, keeping the watermark monotonic.
    pub(crate) fn replace_slides(&mut self, slides: Vec<Slide>) -> bool {
        let Some(fresh) = Self::from_slides(slides) else {
            return false;
        };
        self.slides = fresh.slides;
        self.active_index = 0;
        self.z_watermark = self.z_watermark.max(fresh.z_watermark);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::slide::Background;

    #[test]
    fn new_deck_has_one_slide() {
        let deck = Deck::new();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.active_index(), 0);
        assert!(deck.is_last());
        assert_eq!(deck.watermark(), 20);
    }

    #[test]
    fn from_slides_rejects_empty() {
        assert!(Deck::from_slides(Vec::new()).is_none());
    }

    #[test]
    fn last_slide_cannot_be_removed() {
        let mut deck = Deck::new();
        assert!(deck.remove_slide(0).is_none());
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn removing_tail_clamps_cursor() {
        let mut deck = Deck::new();
        deck.push_slide(Slide::new(Background::color("#111"), 4));
        deck.set_active_index(1);
        assert!(deck.remove_slide(1).is_some());
        assert_eq!(deck.active_index(), 0);
    }

    #[test]
    fn set_active_index_clamps() {
        let mut deck = Deck::new();
        deck.set_active_index(7);
        assert_eq!(deck.active_index(), 0);
    }

    #[test]
    fn replace_keeps_watermark_monotonic() {
        let mut deck = Deck::new();
        for _ in 0..30 {
            deck.allocate_top_z();
        }
        assert_eq!(deck.watermark(), 50);
        assert!(deck.replace_slides(vec![Slide::new(Background::color("#000"), 3)]));
        assert_eq!(deck.watermark(), 50);
        assert!(!deck.replace_slides(Vec::new()));
    }
}
