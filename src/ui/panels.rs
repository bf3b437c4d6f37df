use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::assistant::Role;
use crate::constants::playback::FULL_PROGRESS;
use crate::style::resolved_style;
use crate::ui::create_titled_block;

const SELECTED_BG: Color = Color::Rgb(80, 80, 120);

/// Slide thumbnails as a list: number, title and dwell time.
pub fn draw_slide_list(f: &mut Frame, app: &App, area: Rect) {
    let deck = app.workspace.deck();
    let items: Vec<ListItem> = deck
        .slides()
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let style = if i == deck.active_index() {
                Style::default().fg(Color::Yellow).bg(SELECTED_BG).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(slide.title().to_string(), style),
                Span::styled(format!(" {}s", slide.duration), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(deck.active_index()));
    let list = List::new(items).block(create_titled_block("Slides", false));
    f.render_stateful_widget(list, area, &mut state);
}

/// Layers of the active slide, top-most first.
pub fn draw_layers(f: &mut Frame, app: &App, area: Rect) {
    let slide = app.workspace.deck().active_slide();
    let selection = app.workspace.selection();
    let mut order = slide.paint_order();
    order.reverse();

    let mut state = ListState::default();
    let items: Vec<ListItem> = order
        .iter()
        .enumerate()
        .map(|(i, el)| {
            let selected = selection.is_selected(&el.id);
            if selected {
                state.select(Some(i));
            }
            let style = if selected {
                Style::default().fg(Color::Yellow).bg(SELECTED_BG)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<12}", el.element_type().name()), Style::default().fg(Color::Cyan)),
                Span::styled(el.label().chars().take(24).collect::<String>(), style),
                Span::styled(format!(" z{}", el.z_index), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(create_titled_block("Layers", !selection.is_empty()));
    f.render_stateful_widget(list, area, &mut state);
}

/// Geometry and style of the selected element.
pub fn draw_properties(f: &mut Frame, app: &App, area: Rect) {
    let block = create_titled_block("Properties", false);
    let Some(el) = app.workspace.selected_element() else {
        let slide = app.workspace.deck().active_slide();
        let (w, h) = slide.canvas_size();
        let lines = vec![
            Line::from(format!("Background: {}", slide.background.value)),
            Line::from(format!("Duration: {}s", slide.duration)),
            Line::from(format!("Canvas: {w}x{h}")),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
        return;
    };

    let style = resolved_style(el);
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Gray));
    let lines = vec![
        Line::from(vec![key("Type: "), Span::raw(el.element_type().name())]),
        Line::from(vec![key("Pos: "), Span::raw(format!("{:.0}, {:.0}", el.position.x, el.position.y))]),
        Line::from(vec![key("Size: "), Span::raw(format!("{:.0} x {:.0}", el.size.width, el.size.height))]),
        Line::from(vec![key("Color: "), Span::raw(style.color)]),
        Line::from(vec![key("Opacity: "), Span::raw(format!("{:.2}", style.opacity))]),
        Line::from(vec![
            key("Anim: "),
            Span::raw(format!("{:?} / {:?}", el.animation_in, el.animation_out)),
        ]),
        Line::from(vec![key("Filter: "), Span::raw(style.filter.unwrap_or_else(|| "none".to_string()))]),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}

/// Assistant chat history, newest at the bottom.
pub fn draw_conversation(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.is_asking {
        "Assistant (thinking...)"
    } else if app.has_assistant() {
        "Assistant"
    } else {
        "Assistant (offline)"
    };
    let mut lines: Vec<Line> = Vec::new();
    for message in app.conversation.messages() {
        let (who, color) = match message.role {
            Role::User => ("you", Color::Yellow),
            Role::Assistant => ("ai", Color::Green),
            Role::System => ("--", Color::DarkGray),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{who}: "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(message.content.clone()),
        ]));
    }
    let height = usize::from(area.height.saturating_sub(2));
    let skip = lines.len().saturating_sub(height);
    let paragraph = Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
        .wrap(Wrap { trim: true })
        .block(create_titled_block(title, app.is_asking));
    f.render_widget(paragraph, area);
}

/// One segment per slide: passed slides full, the active one partly filled.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn draw_progress(f: &mut Frame, app: &App, area: Rect) {
    let deck = app.workspace.deck();
    let progress = app.workspace.timeline().map_or(0.0, |t| t.progress());
    let count = deck.len().max(1);
    let seg = (usize::from(area.width) / count).saturating_sub(1).max(1);

    let mut spans = Vec::with_capacity(count * 2);
    for i in 0..count {
        let filled = match i.cmp(&deck.active_index()) {
            std::cmp::Ordering::Less => seg,
            std::cmp::Ordering::Equal => ((progress / FULL_PROGRESS) * seg as f64).round() as usize,
            std::cmp::Ordering::Greater => 0,
        }
        .min(seg);
        spans.push(Span::styled("━".repeat(filled), Style::default().fg(Color::White)));
        spans.push(Span::styled("━".repeat(seg - filled), Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
