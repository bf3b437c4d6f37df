//! Slides: background, dwell duration and a set of elements.

use super::element::{Element, ElementType, Point};
use crate::constants;
use crate::types::{ElementId, SlideId};
use serde::{Deserialize, Serialize};

/// How a slide background value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    /// Solid color.
    Color,
    /// Gradient expression.
    Gradient,
    /// Image URL drawn to cover the canvas.
    Image,
}

/// Slide background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    /// Interpretation of `value`.
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    /// Color, gradient expression or URL.
    pub value: String,
}

impl Background {
    /// Solid color background.
    pub fn color(value: impl Into<String>) -> Self {
        Self { kind: BackgroundKind::Color, value: value.into() }
    }

    /// Gradient background.
    pub fn gradient(value: impl Into<String>) -> Self {
        Self { kind: BackgroundKind::Gradient, value: value.into() }
    }

    /// Image background.
    pub fn image(url: impl Into<String>) -> Self {
        Self { kind: BackgroundKind::Image, value: url.into() }
    }
}

/// One screen of a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Identity.
    pub id: SlideId,
    /// Background fill.
    pub background: Background,
    /// Autoplay dwell time in whole seconds; always positive.
    pub duration: u32,
    /// Elements in stored order. Paint order comes from `z_index`.
    pub elements: Vec<Element>,
    /// Canvas width; the renderer default applies when absent.
    #[serde(default, rename = "width", skip_serializing_if = "Option::is_none")]
    pub canvas_width: Option<u32>,
    /// Canvas height; the renderer default applies when absent.
    #[serde(default, rename = "height", skip_serializing_if = "Option::is_none")]
    pub canvas_height: Option<u32>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new(background: Background, duration: u32) -> Self {
        Self {
            id: SlideId::generate(),
            background,
            duration,
            elements: Vec::new(),
            canvas_width: None,
            canvas_height: None,
        }
    }

    /// Elements in paint order: ascending `z_index`, ties by stored position.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        // sort_by_key is stable
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Top-most element under a canvas point.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&Element> {
        self.paint_order().into_iter().rev().find(|e| e.contains(point))
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Look up an element by id for mutation.
    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    /// Whether an element with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Smallest z-index on the slide, if any.
    #[must_use]
    pub fn min_z(&self) -> Option<i64> {
        self.elements.iter().map(|e| e.z_index).min()
    }

    /// Largest z-index on the slide, if any.
    #[must_use]
    pub fn max_z(&self) -> Option<i64> {
        self.elements.iter().map(|e| e.z_index).max()
    }

    /// Canvas size with renderer defaults applied.
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.canvas_width.unwrap_or(constants::canvas::DEFAULT_WIDTH),
            self.canvas_height.unwrap_or(constants::canvas::DEFAULT_HEIGHT),
        )
    }

    /// Display title: the first title element's content.
    #[must_use]
    pub fn title(&self) -> &str {
        self.elements
            .iter()
            .find(|e| e.element_type() == ElementType::Title)
            .map_or("Untitled Slide", Element::content)
    }

    /// Duplicate element ids, if any. A well-formed slide has none.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<&ElementId> {
        let mut seen = std::collections::HashSet::new();
        self.elements
            .iter()
            .filter(|e| !seen.insert(&e.id))
            .map(|e| &e.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::{ElementKind, Size};

    fn text(id: &str, z: i64) -> Element {
        let mut e = Element::new(
            ElementKind::Text { text: id.to_string() },
            Point::new(0.0, 0.0),
            Size::new(100.0, 100.0),
            z,
        );
        e.id = ElementId::new(id);
        e
    }

    fn slide_with(elements: Vec<Element>) -> Slide {
        let mut slide = Slide::new(Background::color("#000"), 5);
        slide.elements = elements;
        slide
    }

    #[test]
    fn paint_order_is_ascending_and_stable() {
        let slide = slide_with(vec![text("a", 5), text("b", 1), text("c", 5), text("d", 3)]);
        let ids: Vec<&str> = slide.paint_order().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
        // Same state, same order
        let again: Vec<&str> = slide.paint_order().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, again);
    }

    #[test]
    fn hit_test_returns_top_most() {
        let slide = slide_with(vec![text("low", 1), text("high", 9)]);
        let hit = slide.hit_test(Point::new(10.0, 10.0)).map(|e| e.id.as_str());
        assert_eq!(hit, Some("high"));
        assert!(slide.hit_test(Point::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn title_falls_back() {
        assert_eq!(slide_with(vec![]).title(), "Untitled Slide");
    }

    #[test]
    fn canvas_defaults_to_portrait() {
        let slide = slide_with(vec![]);
        assert_eq!(slide.canvas_size(), (1080, 1920));
    }

    #[test]
    fn canvas_fields_use_short_wire_names() {
        let mut slide = slide_with(vec![]);
        slide.canvas_width = Some(3000);
        let json = serde_json::to_value(&slide).unwrap_or_default();
        assert_eq!(json["width"], 3000);
        assert!(json.get("height").is_none());
        assert_eq!(json["background"]["type"], "color");
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let slide = slide_with(vec![text("a", 1), text("a", 2)]);
        assert_eq!(slide.duplicate_ids().len(), 1);
    }
}
