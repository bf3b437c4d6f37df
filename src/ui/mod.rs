//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the editor and the
//! full-screen preview using ratatui.

mod canvas;
mod panels;

pub use canvas::{background_color, term_color, Viewport};

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::input::AppMode;
use crate::text_input::TextTarget;

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let now = Instant::now();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    match app.mode() {
        AppMode::Edit => draw_editor(f, app, chunks[0], now),
        AppMode::Preview => draw_preview(f, app, chunks[0], now),
    }
    draw_command_bar(f, app, chunks[1]);

    if let Some(error) = &app.error_message {
        draw_error_message(f, error);
        return;
    }
    if app.show_help {
        draw_help_modal(f, app);
    }
}

fn draw_editor(f: &mut Frame, app: &App, area: Rect, now: Instant) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20), Constraint::Length(40)])
        .split(area);

    panels::draw_slide_list(f, app, columns[0]);

    let slide = app.workspace.deck().active_slide();
    let title = format!(
        "Slide {} / {}",
        app.workspace.deck().active_index() + 1,
        app.workspace.deck().len()
    );
    let block = create_titled_block(&title, true);
    let inner = block.inner(columns[1]);
    f.render_widget(block, columns[1]);
    canvas::draw_canvas(f, app, inner, now);
    if slide.elements.is_empty() {
        let hint = Paragraph::new("Empty slide. Try :title Hello or :shape star")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint, inner);
    }

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Length(9), Constraint::Min(3)])
        .split(columns[2]);
    panels::draw_layers(f, app, side[0]);
    panels::draw_properties(f, app, side[1]);
    panels::draw_conversation(f, app, side[2]);
}

fn draw_preview(f: &mut Frame, app: &App, area: Rect, now: Instant) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    panels::draw_progress(f, app, rows[0]);
    canvas::draw_canvas(f, app, rows[1], now);

    let deck = app.workspace.deck();
    let paused = app.workspace.timeline().is_some_and(|t| t.is_paused());
    let mut footer = format!("Slide {} / {}", deck.active_index() + 1, deck.len());
    if paused {
        footer.push_str("  (paused)");
    }
    let footer = Paragraph::new(footer)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(footer, rows[2]);
}

#[allow(clippy::cast_possible_truncation)]
fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let (title, prefix) = match app.text_input.as_ref().map(|i| i.target()) {
        Some(TextTarget::Command) => ("Command", ":"),
        Some(TextTarget::Content(_)) => ("Edit content", "> "),
        Some(TextTarget::Ask) => ("Ask the assistant", "? "),
        None => ("Commands/Status", ""),
    };
    let border_color = if app.text_input.is_some() { Color::Yellow } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(input) = &app.text_input {
        let line = Paragraph::new(format!(" {prefix}{}", input.text())).style(Style::default().fg(Color::Yellow));
        f.render_widget(line, inner);
        let x = inner.left() + 1 + prefix.len() as u16 + input.cursor_column() as u16;
        f.set_cursor(x.min(inner.right().saturating_sub(1)), inner.top());
        return;
    }

    if let Some(status) = &app.status_message {
        let line = Paragraph::new(format!(" {status}")).style(Style::default().fg(Color::Cyan));
        f.render_widget(line, inner);
        return;
    }

    let help = match app.mode() {
        AppMode::Edit => create_help_text(&[
            ("Space", "Play"),
            ("Tab", "Select"),
            ("e", "Edit"),
            (":", "Command"),
            ("a", "Ask"),
            ("?", "Help"),
            ("q", "Quit"),
        ]),
        AppMode::Preview => create_help_text(&[
            ("Space", "Next"),
            ("←/→", "Seek"),
            ("p", "Pause"),
            ("Esc", "Exit"),
        ]),
    };
    f.render_widget(Paragraph::new(Line::from(help)).style(Style::default().fg(Color::Gray)), inner);
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")];
    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));
        if i + 1 < commands.len() {
            text.push(Span::raw(" | "));
        }
    }
    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let (title_style, border_style) = if is_focused {
        (Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD), Style::default().fg(Color::Yellow))
    } else {
        (Style::default(), Style::default())
    };
    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn centered(size: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width: width.min(size.width),
        height: height.min(size.height),
    }
}

// Draw an error message overlay
fn draw_error_message(f: &mut Frame, message: &str) {
    let size = f.size();
    let area = centered(size, 50.min(size.width.saturating_sub(4)), 6);

    let block = Block::default()
        .title(Span::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));
    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    f.render_widget(text, rows[0]);
    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(hint, rows[1]);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame, app: &App) {
    let size = f.size();
    let area = centered(size, 64.min(size.width.saturating_sub(4)), 30.min(size.height.saturating_sub(2)));

    let block = Block::default()
        .title(Span::styled(" Help - Keybindings ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    f.render_widget(Clear, area);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = build_help_content(app)
        .into_iter()
        .map(|(key, desc, is_header)| {
            if is_header {
                Line::from(Span::styled(key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>14}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn build_help_content(app: &App) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("── Playback ──", "", true),
        ("Space", "Play / next slide / exit at end", false),
        ("p", "Pause or resume (preview)", false),
        ("←/→", "Seek (preview)", false),
        ("Esc", "Exit preview", false),
        ("", "", false),
        ("── Elements ──", "", true),
        ("Tab / S-Tab", "Cycle selection", false),
        ("Arrows", "Move selected", false),
        ("Shift+Arrows", "Resize selected", false),
        ("e / Enter", "Edit text", false),
        ("d", "Duplicate", false),
        ("] / [", "Bring to front / send to back", false),
        ("Del", "Remove", false),
        ("", "", false),
        ("── Slides ──", "", true),
        ("n / X", "Add / remove slide", false),
        ("PgUp / PgDn", "Previous / next slide", false),
        ("", "", false),
        ("── Commands ──", "", true),
        (":title :text", "Add text (also :value :metric)", false),
        (":shape :svg", "Add a named shape or markup", false),
        (":image :video", "Add media from a path or URL", false),
        (":layer <n>", "Move selected to layer n (1 = bottom)", false),
        (":bg :duration", "Slide background and time", false),
        (":save :share", "Save / copy a share link", false),
        (":open <id>", "Play a shared deck", false),
    ];
    if app.has_assistant() {
        lines.extend([("a / y", "Ask assistant / add its shape", false)]);
    }
    lines.push(("", "", false));
    lines.push(("Press Esc, F1 or ? to close", "", true));
    lines
}
