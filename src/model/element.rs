//! Positioned visual elements.
//!
//! An [`Element`] is a common envelope (identity, geometry, z-order, style,
//! animations) around a kind-specific payload ([`ElementKind`]). On the wire
//! an element is one flat record with a `type` tag and a `content` string;
//! optional style attributes are omitted when unset.

use crate::types::ElementId;
use serde::{Deserialize, Serialize};

/// Closed set of element kinds, as written in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Raster image referenced by URL.
    Image,
    /// Video referenced by URL.
    Video,
    /// Inline vector-shape markup.
    Shape,
    /// Free text.
    Text,
    /// Small metric callout.
    Metric,
    /// Large heading.
    Title,
    /// Supporting copy.
    Description,
    /// Highlighted key value.
    Value,
}

impl ElementType {
    /// Returns all element types in palette order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Image,
            Self::Video,
            Self::Shape,
            Self::Text,
            Self::Metric,
            Self::Title,
            Self::Description,
            Self::Value,
        ]
    }

    /// Returns the human-readable name of this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Shape => "Shape",
            Self::Text => "Text",
            Self::Metric => "Metric",
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Value => "Value",
        }
    }

    /// Whether the content is plain text the user can type into.
    #[must_use]
    pub const fn is_text_like(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Metric | Self::Title | Self::Description | Self::Value
        )
    }
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Image URL.
    Image {
        /// Stable content URL.
        url: String,
    },
    /// Video URL.
    Video {
        /// Stable content URL.
        url: String,
    },
    /// Raw vector-shape markup.
    Shape {
        /// SVG fragment drawn inside a 100x100 view box.
        markup: String,
    },
    /// Free text.
    Text {
        /// Displayed text.
        text: String,
    },
    /// Metric callout.
    Metric {
        /// Displayed text.
        text: String,
    },
    /// Heading.
    Title {
        /// Displayed text.
        text: String,
    },
    /// Supporting copy.
    Description {
        /// Displayed text.
        text: String,
    },
    /// Key value.
    Value {
        /// Displayed text.
        text: String,
    },
}

impl ElementKind {
    /// Build a payload from its wire representation.
    pub fn from_parts(element_type: ElementType, content: impl Into<String>) -> Self {
        let content = content.into();
        match element_type {
            ElementType::Image => Self::Image { url: content },
            ElementType::Video => Self::Video { url: content },
            ElementType::Shape => Self::Shape { markup: content },
            ElementType::Text => Self::Text { text: content },
            ElementType::Metric => Self::Metric { text: content },
            ElementType::Title => Self::Title { text: content },
            ElementType::Description => Self::Description { text: content },
            ElementType::Value => Self::Value { text: content },
        }
    }

    /// The wire tag of this payload.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::Image { .. } => ElementType::Image,
            Self::Video { .. } => ElementType::Video,
            Self::Shape { .. } => ElementType::Shape,
            Self::Text { .. } => ElementType::Text,
            Self::Metric { .. } => ElementType::Metric,
            Self::Title { .. } => ElementType::Title,
            Self::Description { .. } => ElementType::Description,
            Self::Value { .. } => ElementType::Value,
        }
    }

    /// The content string, whatever the kind.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Image { url } | Self::Video { url } => url,
            Self::Shape { markup } => markup,
            Self::Text { text }
            | Self::Metric { text }
            | Self::Title { text }
            | Self::Description { text }
            | Self::Value { text } => text,
        }
    }

    /// Replace the content while keeping the kind.
    pub fn set_content(&mut self, content: impl Into<String>) {
        *self = Self::from_parts(self.element_type(), content);
    }
}

/// Enter animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationIn {
    /// Appear at steady state.
    None,
    /// Fade in.
    #[default]
    Fade,
    /// Fade in while sliding right from the left.
    SlideLeft,
    /// Fade in while sliding left from the right.
    SlideRight,
    /// Fade in while growing.
    ScaleUp,
}

impl AnimationIn {
    /// Returns all variants in picker order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::None, Self::Fade, Self::SlideLeft, Self::SlideRight, Self::ScaleUp]
    }
}

/// Exit animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationOut {
    /// No dedicated exit; resolved as a fade.
    #[default]
    None,
    /// Fade out.
    Fade,
    /// Fade out while shrinking.
    ScaleDown,
}

impl AnimationOut {
    /// Returns all variants in picker order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::None, Self::Fade, Self::ScaleDown]
    }
}

/// Position in slide canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset from the canvas left edge.
    pub x: f64,
    /// Vertical offset from the canvas top edge.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point moved by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Extent in slide canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Optional style attributes. `None` means "use the kind default at render time".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Target opacity in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Foreground color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Fill behind the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Inner padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    /// Corner radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Shadow description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    /// Blur applied behind the element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_blur: Option<f64>,
    /// Filter chain applied to the element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// One positioned visual unit on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ElementRecord", into = "ElementRecord")]
pub struct Element {
    /// Identity, fixed at creation.
    pub id: ElementId,
    /// Kind and content.
    pub kind: ElementKind,
    /// Top-left corner.
    pub position: Point,
    /// Extent.
    pub size: Size,
    /// Paint order key; higher paints later.
    pub z_index: i64,
    /// Optional style attributes.
    pub style: Style,
    /// Enter animation.
    pub animation_in: AnimationIn,
    /// Exit animation.
    pub animation_out: AnimationOut,
}

impl Element {
    /// Create an element with no style overrides and default animations.
    pub fn new(kind: ElementKind, position: Point, size: Size, z_index: i64) -> Self {
        Self {
            id: ElementId::generate(),
            kind,
            position,
            size,
            z_index,
            style: Style::default(),
            animation_in: AnimationIn::default(),
            animation_out: AnimationOut::default(),
        }
    }

    /// The wire tag of this element.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// The content string.
    #[must_use]
    pub fn content(&self) -> &str {
        self.kind.content()
    }

    /// Opacity the element settles at.
    #[must_use]
    pub fn target_opacity(&self) -> f64 {
        self.style.opacity.unwrap_or(1.0)
    }

    /// Whether a canvas point falls inside the element's box.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.position.x
            && point.y >= self.position.y
            && point.x <= self.position.x + self.size.width
            && point.y <= self.position.y + self.size.height
    }

    /// Label for layer lists: text content for text-like kinds, else the kind name.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.element_type().is_text_like() {
            self.content()
        } else {
            self.element_type().name()
        }
    }
}

/// Flat persisted form of an [`Element`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementRecord {
    id: ElementId,
    #[serde(rename = "type")]
    element_type: ElementType,
    content: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    z_index: i64,
    #[serde(flatten)]
    style: Style,
    #[serde(default)]
    animation_in: AnimationIn,
    #[serde(default)]
    animation_out: AnimationOut,
}

impl From<ElementRecord> for Element {
    fn from(r: ElementRecord) -> Self {
        Self {
            id: r.id,
            kind: ElementKind::from_parts(r.element_type, r.content),
            position: Point::new(r.x, r.y),
            size: Size::new(r.width, r.height),
            z_index: r.z_index,
            style: r.style,
            animation_in: r.animation_in,
            animation_out: r.animation_out,
        }
    }
}

impl From<Element> for ElementRecord {
    fn from(e: Element) -> Self {
        let element_type = e.kind.element_type();
        let content = match e.kind {
            ElementKind::Image { url } | ElementKind::Video { url } => url,
            ElementKind::Shape { markup } => markup,
            ElementKind::Text { text }
            | ElementKind::Metric { text }
            | ElementKind::Title { text }
            | ElementKind::Description { text }
            | ElementKind::Value { text } => text,
        };
        Self {
            id: e.id,
            element_type,
            content,
            x: e.position.x,
            y: e.position.y,
            width: e.size.width,
            height: e.size.height,
            z_index: e.z_index,
            style: e.style,
            animation_in: e.animation_in,
            animation_out: e.animation_out,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;

    fn title(text: &str) -> Element {
        Element::new(
            ElementKind::Title { text: text.to_string() },
            Point::new(50.0, 100.0),
            Size::new(600.0, 80.0),
            10,
        )
    }

    #[test]
    fn kind_round_trips_through_parts() {
        for &t in ElementType::all() {
            let kind = ElementKind::from_parts(t, "payload");
            assert_eq!(kind.element_type(), t);
            assert_eq!(kind.content(), "payload");
        }
    }

    #[test]
    fn set_content_keeps_kind() {
        let mut kind = ElementKind::Metric { text: "+42%".to_string() };
        kind.set_content("+50%");
        assert_eq!(kind, ElementKind::Metric { text: "+50%".to_string() });
    }

    #[test]
    fn unset_style_fields_are_omitted() {
        let json = serde_json::to_value(title("Hello")).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["type"], "title");
        assert_eq!(obj["content"], "Hello");
        assert_eq!(obj["zIndex"], 10);
        assert_eq!(obj["animationIn"], "fade");
        assert!(!obj.contains_key("opacity"));
        assert!(!obj.contains_key("backgroundColor"));
    }

    #[test]
    fn missing_animations_take_defaults() {
        let json = r##"{"id":"a","type":"metric","content":"x","x":1,"y":2,"width":3,"height":4,"zIndex":7,"color":"#fff"}"##;
        let el: Element = serde_json::from_str(json).unwrap();
        assert_eq!(el.animation_in, AnimationIn::Fade);
        assert_eq!(el.animation_out, AnimationOut::None);
        assert_eq!(el.style.color.as_deref(), Some("#fff"));
        assert_eq!(el.z_index, 7);
    }

    #[test]
    fn missing_z_index_is_rejected() {
        let json = r#"{"id":"a","type":"text","content":"x","x":1,"y":2,"width":3,"height":4}"#;
        assert!(serde_json::from_str::<Element>(json).is_err());
    }

    #[test]
    fn contains_uses_box_bounds() {
        let el = title("Hi");
        assert!(el.contains(Point::new(50.0, 100.0)));
        assert!(el.contains(Point::new(650.0, 180.0)));
        assert!(!el.contains(Point::new(49.0, 100.0)));
    }

    #[test]
    fn label_prefers_text_content() {
        assert_eq!(title("Hi").label(), "Hi");
        let img = Element::new(
            ElementKind::Image { url: "https://x/y.png".to_string() },
            Point::default(),
            Size::new(1.0, 1.0),
            1,
        );
        assert_eq!(img.label(), "Image");
    }
}
