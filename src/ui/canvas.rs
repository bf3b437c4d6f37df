//! Slide canvas drawn in terminal cells.
//!
//! The slide is letterboxed into the available area. Terminal cells are
//! roughly twice as tall as they are wide, so one row covers two columns'
//! worth of canvas units.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::model::{Background, BackgroundKind, Element, ElementType};
use crate::style::{parse_hex_color, resolved_style};

/// Mapping from canvas units to the cells of a letterboxed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Cells the canvas occupies.
    pub frame: Rect,
    /// Canvas units per column.
    pub units_per_col: f64,
}

impl Viewport {
    /// Fit a `width` x `height` canvas into `area`, centered.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fit(width: u32, height: u32, area: Rect) -> Self {
        let (w, h) = (f64::from(width.max(1)), f64::from(height.max(1)));
        let cols = f64::from(area.width.max(1));
        let rows = f64::from(area.height.max(1));
        let units_per_col = (w / cols).max(h / (rows * 2.0));
        let fw = ((w / units_per_col).round() as u16).clamp(1, area.width.max(1));
        let fh = ((h / (units_per_col * 2.0)).round() as u16).clamp(1, area.height.max(1));
        let frame = Rect {
            x: area.x + (area.width.saturating_sub(fw)) / 2,
            y: area.y + (area.height.saturating_sub(fh)) / 2,
            width: fw,
            height: fh,
        };
        Self { frame, units_per_col }
    }

    /// Cells covering a canvas box, clipped to the frame. `None` when nothing is visible.
    #[allow(clippy::cast_possible_truncation)]
    pub fn cells(&self, x: f64, y: f64, width: f64, height: f64) -> Option<Rect> {
        let col = |v: f64| (v / self.units_per_col).floor();
        let row = |v: f64| (v / (self.units_per_col * 2.0)).floor();
        let (far_col, far_row) = (col(x + width), row(y + height));
        // Entirely left of or above the frame
        if far_col <= 0.0 || far_row <= 0.0 {
            return None;
        }
        let left = col(x).max(0.0);
        let top = row(y).max(0.0);
        let right = far_col.max(left + 1.0).min(f64::from(self.frame.width));
        let bottom = far_row.max(top + 1.0).min(f64::from(self.frame.height));
        if left >= right || top >= bottom {
            return None;
        }
        Some(Rect {
            x: self.frame.x + left as u16,
            y: self.frame.y + top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }
}

/// Terminal color for a CSS-ish color string.
pub fn term_color(value: &str) -> Option<Color> {
    parse_hex_color(value).map(|(r, g, b)| Color::Rgb(r, g, b))
}

/// Flat color standing in for a background: the color itself, or the
/// first hex stop of a gradient.
pub fn background_color(background: &Background) -> Color {
    let fallback = Color::Black;
    match background.kind {
        BackgroundKind::Color => term_color(&background.value).unwrap_or(fallback),
        BackgroundKind::Gradient => background
            .value
            .match_indices('#')
            .find_map(|(i, _)| {
                let end = background.value[i..]
                    .find(|c: char| !(c == '#' || c.is_ascii_hexdigit()))
                    .map_or(background.value.len(), |n| i + n);
                term_color(&background.value[i..end])
            })
            .unwrap_or(fallback),
        BackgroundKind::Image => Color::DarkGray,
    }
}

fn body(element: &Element) -> String {
    match element.element_type() {
        ElementType::Image | ElementType::Video => {
            let url = element.content();
            let name = url.rsplit('/').next().unwrap_or(url);
            format!("[{}] {name}", element.element_type().name())
        }
        ElementType::Shape => "◆".to_string(),
        _ => element.content().to_string(),
    }
}

/// Draw the active slide with every element at its current animation frame.
pub fn draw_canvas(f: &mut Frame, app: &App, area: Rect, now: Instant) {
    let workspace = &app.workspace;
    let slide = workspace.deck().active_slide();
    let (width, height) = slide.canvas_size();
    let view = Viewport::fit(width, height, area);
    let bg = background_color(&slide.background);

    f.render_widget(Block::default().style(Style::default().bg(bg)), view.frame);

    let (visible, elapsed) = workspace.visible(now);
    for item in visible {
        let el = item.element;
        let t = workspace.fade_elapsed(el, now).unwrap_or(elapsed);
        let state = item.plan.sample(t);
        if state.opacity < 0.05 {
            continue;
        }
        let w = el.size.width * state.scale;
        let h = el.size.height * state.scale;
        let x = state.x + (el.size.width - w) / 2.0;
        let y = el.position.y + (el.size.height - h) / 2.0;
        let Some(cells) = view.cells(x, y, w, h) else {
            continue;
        };

        let style = resolved_style(el);
        let fg = term_color(&style.color).unwrap_or(Color::White);
        let fill = style.background_color.as_deref().and_then(term_color).unwrap_or(bg);
        let mut text_style = Style::default().fg(fg).bg(fill);
        if state.opacity < 0.5 {
            text_style = text_style.add_modifier(Modifier::DIM);
        }
        if el.element_type() == ElementType::Title {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }

        let selected = workspace.selection().is_selected(&el.id) && !workspace.is_previewing();
        let border_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(fg)
        };
        let border_type = if style.border_radius > 0.0 || el.element_type() == ElementType::Shape {
            BorderType::Rounded
        } else {
            BorderType::Plain
        };
        // Tiny boxes get no border so the content stays readable
        let borders = if cells.width >= 3 && cells.height >= 3 { Borders::ALL } else { Borders::NONE };

        let block = Block::default().borders(borders).border_type(border_type).border_style(border_style);
        let paragraph = Paragraph::new(body(el))
            .style(text_style)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(Clear, cells);
        f.render_widget(paragraph, cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_canvas_is_letterboxed_horizontally() {
        let view = Viewport::fit(1080, 1920, Rect::new(0, 0, 100, 40));
        assert_eq!(view.frame.height, 40);
        assert!(view.frame.width < 100);
        assert_eq!(view.frame.x, (100 - view.frame.width) / 2);
    }

    #[test]
    fn boxes_are_clipped_to_the_frame() {
        let view = Viewport::fit(1080, 1920, Rect::new(0, 0, 100, 40));
        assert!(view.cells(-500.0, 0.0, 100.0, 100.0).is_none());
        assert!(view.cells(0.0, -500.0, 100.0, 100.0).is_none());
        let straddling = view.cells(-50.0, 0.0, 100.0, 100.0);
        assert!(straddling.is_some_and(|r| r.x == view.frame.x));
        let r = view.cells(1000.0, 1800.0, 500.0, 500.0);
        assert!(r.is_some_and(|r| r.right() <= view.frame.right() && r.bottom() <= view.frame.bottom()));
    }

    #[test]
    fn gradient_uses_first_stop() {
        let bg = Background::gradient("linear-gradient(to bottom right, #000000, #1a1a1a)");
        assert_eq!(background_color(&bg), Color::Rgb(0, 0, 0));
        assert_eq!(background_color(&Background::color("#fff")), Color::Rgb(255, 255, 255));
        assert_eq!(background_color(&Background::image("https://x")), Color::DarkGray);
    }
}
