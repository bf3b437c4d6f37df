//! Render-time style resolution.
//!
//! Stored styles keep absent attributes absent. Kind defaults are filled in
//! here, when something is about to be drawn, and never written back.

use crate::model::{Element, ElementType};

/// A fully populated style for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    /// Rotation in degrees.
    pub rotation: f64,
    /// Target opacity.
    pub opacity: f64,
    /// Foreground color.
    pub color: String,
    /// Background fill, if any.
    pub background_color: Option<String>,
    /// Inner padding.
    pub padding: f64,
    /// Corner radius.
    pub border_radius: f64,
    /// Shadow, if any.
    pub box_shadow: Option<String>,
    /// Backdrop blur radius.
    pub backdrop_blur: f64,
    /// Filter chain, if any.
    pub filter: Option<String>,
}

struct KindDefaults {
    color: &'static str,
    background_color: Option<&'static str>,
    padding: f64,
    border_radius: f64,
}

const fn defaults_for(kind: ElementType) -> KindDefaults {
    match kind {
        ElementType::Shape => KindDefaults {
            color: "#8b5cf6",
            background_color: None,
            padding: 0.0,
            border_radius: 0.0,
        },
        ElementType::Value => KindDefaults {
            color: "#10b981",
            background_color: Some("rgba(255,255,255,0.05)"),
            padding: 24.0,
            border_radius: 16.0,
        },
        ElementType::Metric => KindDefaults {
            color: "#ffffff99",
            background_color: None,
            padding: 8.0,
            border_radius: 12.0,
        },
        _ => KindDefaults {
            color: "#ffffff",
            background_color: None,
            padding: 0.0,
            border_radius: 0.0,
        },
    }
}

/// Fill kind defaults into an element's stored style.
#[must_use]
pub fn resolved_style(element: &Element) -> ResolvedStyle {
    let d = defaults_for(element.element_type());
    let s = &element.style;
    ResolvedStyle {
        rotation: s.rotation.unwrap_or(0.0),
        opacity: element.target_opacity(),
        color: s.color.clone().unwrap_or_else(|| d.color.to_string()),
        background_color: s
            .background_color
            .clone()
            .or_else(|| d.background_color.map(str::to_string)),
        padding: s.padding.unwrap_or(d.padding),
        border_radius: s.border_radius.unwrap_or(d.border_radius),
        box_shadow: s.box_shadow.clone(),
        backdrop_blur: s.backdrop_blur.unwrap_or(0.0),
        filter: s.filter.clone().filter(|f| f != "none"),
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into RGB components. Other forms yield `None`.
#[must_use]
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((it.next()??, it.next()??, it.next()??))
        }
        6 | 8 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}
