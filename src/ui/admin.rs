use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{centered, key_hint, notice_line, panel, tabs};
use crate::app::{AdminTab, App, CredentialField};

pub fn render_admin(frame: &mut Frame, area: Rect, app: &App) {
    if app.admin.session.is_some() {
        render_dashboard(frame, area, app);
    } else {
        render_credentials(frame, area, app);
    }
}

fn render_credentials(frame: &mut Frame, area: Rect, app: &App) {
    let box_area = centered(area, 50, 13);
    frame.render_widget(Clear, box_area);
    let block = panel(" 🔐 Admin Login ");
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let field = |label: &'static str, value: String, focused: bool| {
        let marker = if focused { "▶ " } else { "  " };
        let value_style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Rgb(140, 140, 140))
        };
        Line::from(vec![
            Span::styled(format!("  {marker}"), Style::default().fg(Color::Rgb(255, 220, 80))),
            Span::styled(format!("{label:<10}"), Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled("[ ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(value, value_style),
            Span::styled(" ]", Style::default().fg(Color::Rgb(100, 100, 130))),
        ])
    };

    let focus = app.admin.focus;
    let mut lines = vec![
        Line::from(""),
        field("Username", app.admin.username.clone(), focus == CredentialField::Username),
        Line::from(""),
        field(
            "Password",
            "*".repeat(app.admin.password.chars().count()),
            focus == CredentialField::Password,
        ),
        Line::from(""),
    ];
    match &app.admin.notice {
        Some(notice) => lines.push(notice_line(notice)),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(""));

    let mut hints = vec![Span::raw("  ")];
    hints.extend(key_hint("↑ ↓", " field  "));
    hints.extend(key_hint("Enter", " login  "));
    hints.extend(key_hint("Tab", " back to game"));
    lines.push(Line::from(hints));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let username = app
        .admin
        .session
        .as_ref()
        .map(|s| s.username())
        .unwrap_or_default();
    let block = panel(format!(" 🛠 Admin Dashboard ({username}) "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Admin tabs
            Constraint::Length(1),
            Constraint::Min(4),    // Tab body
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Help
        ])
        .split(inner);

    tabs::render_admin_tabs(frame, app.admin.tab, chunks[0]);

    match app.admin.tab {
        AdminTab::Add => render_add(frame, chunks[2], app),
        AdminTab::View => render_view(frame, chunks[2], app),
        AdminTab::Remove => render_remove(frame, chunks[2], app),
    }

    if let Some(notice) = &app.admin.notice {
        frame.render_widget(Paragraph::new(notice_line(notice)), chunks[3]);
    }

    let mut help = vec![Span::raw(" ")];
    help.extend(key_hint("← →", " section  "));
    help.extend(key_hint("PgUp/PgDn", " category  "));
    match app.admin.tab {
        AdminTab::Add => help.extend(key_hint("Enter", " add  ")),
        AdminTab::Remove => {
            help.extend(key_hint("↑ ↓", " word  "));
            help.extend(key_hint("Enter", " remove  "));
        }
        AdminTab::View => {}
    }
    help.extend(key_hint("Esc", " logout admin"));
    frame.render_widget(Paragraph::new(Line::from(help)), chunks[4]);
}

fn category_line(app: &App) -> Line<'_> {
    Line::from(vec![
        Span::styled("  Category: ", Style::default().fg(Color::Rgb(180, 180, 200))),
        Span::styled(
            format!("◀ {} ▶", app.selected_category().unwrap_or("-")),
            Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_add(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(
            "  ➕ Add New Words",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        category_line(app),
        Line::from(""),
        Line::from(vec![
            Span::styled("  New word: ", Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled("[ ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(
                format!("{}█", app.admin.word_input),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ]", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_view(frame: &mut Frame, area: Rect, app: &App) {
    let bank = app.controller.word_bank();
    let mut lines = vec![
        Line::from(Span::styled(
            "  📋 View All Words",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for category in bank.categories() {
        let words = bank.words(category).unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {category}: "),
                Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(words.join(", "), Style::default().fg(Color::Rgb(180, 180, 200))),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_remove(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    let header = vec![
        Line::from(Span::styled(
            "  🗑 Remove Words",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        category_line(app),
    ];
    frame.render_widget(Paragraph::new(header), rows[0]);

    let words = app.selected_words();
    if words.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "  No words in this category",
                Style::default().fg(Color::Rgb(60, 60, 80)),
            )),
            rows[1],
        );
        return;
    }

    let items: Vec<ListItem> = words
        .iter()
        .map(|w| ListItem::new(format!("  {w}")))
        .collect();
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(15, 15, 25))
                .bg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶");
    let mut state = ListState::default().with_selected(Some(app.admin.word_idx));
    frame.render_stateful_widget(list, rows[1], &mut state);
}
