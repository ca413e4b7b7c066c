pub mod admin;
pub mod play;
pub mod tabs;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Notice, Tab};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),   // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);

    match app.current_tab {
        Tab::Play => play::render_play(frame, chunks[1], app),
        Tab::Admin => admin::render_admin(frame, chunks[1], app),
    }
}

pub(crate) fn notice_line(notice: &Notice) -> Line<'_> {
    let (icon, text, color) = match notice {
        Notice::Success(text) => ("✅ ", text, Color::Rgb(80, 220, 80)),
        Notice::Warning(text) => ("⚠ ", text, Color::Rgb(255, 200, 80)),
        Notice::Error(text) => ("❌ ", text, Color::Rgb(230, 80, 80)),
    };
    Line::from(vec![
        Span::styled(format!("  {icon}"), Style::default()),
        Span::styled(text.as_str(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

pub(crate) fn key_hint(key: &'static str, label: &'static str) -> Vec<Span<'static>> {
    vec![
        Span::styled(key, Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(label, Style::default().fg(Color::Rgb(100, 100, 130))),
    ]
}

pub(crate) fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(title.into())
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD))
}

/// Rect of at most `width` x `height` centred in `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
