use ratatui::prelude::*;
use ratatui::widgets::*;

use quizguess::{Feedback, RoundState, RoundStatus, Session, MAX_LIVES};

use super::{centered, key_hint, notice_line, panel};
use crate::app::App;

pub fn render_play(frame: &mut Frame, area: Rect, app: &App) {
    match &app.session {
        None => render_login(frame, area, app),
        Some(session) => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(area);
            render_round(frame, cols[0], app, session.round());
            render_sidebar(frame, cols[1], app, session);
        }
    }
}

fn render_login(frame: &mut Frame, area: Rect, app: &App) {
    let box_area = centered(area, 60, 14);
    frame.render_widget(Clear, box_area);
    let block = panel(" 🔤 Quiz Guess Game ");
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Guess the hidden word, one letter per turn!",
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Enter your name to start:",
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("    [ ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(
                format!("{}█", app.name_input),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ]", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
        Line::from(""),
    ];
    if let Some(notice) = &app.notice {
        lines.push(notice_line(notice));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));

    let mut hints = vec![Span::raw("  ")];
    hints.extend(key_hint("Enter", " start game  "));
    hints.extend(key_hint("Tab", " admin panel  "));
    hints.extend(key_hint("Esc", " quit"));
    lines.push(Line::from(hints));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_round(frame: &mut Frame, area: Rect, app: &App, round: &RoundState) {
    let block = panel(" 🎮 Guess the word ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Feedback
            Constraint::Length(3), // Word
            Constraint::Length(3), // Lives gauge
            Constraint::Length(4), // Details
            Constraint::Min(3),    // Input or result
            Constraint::Length(1), // Help
        ])
        .split(inner);

    // Feedback: storage problems take priority over round feedback
    let feedback = match &app.notice {
        Some(notice) => notice_line(notice),
        None => feedback_line(round.feedback()),
    };
    frame.render_widget(Paragraph::new(feedback), chunks[0]);

    let word = Paragraph::new(Line::from(Span::styled(
        round.display(),
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP | Borders::BOTTOM).border_style(Style::default().fg(Color::Rgb(60, 60, 80))));
    frame.render_widget(word, chunks[1]);

    let lives = round.lives_remaining();
    let gauge_color = match lives {
        0..=2 => Color::Rgb(230, 80, 80),
        3..=4 => Color::Rgb(255, 200, 80),
        _ => Color::Rgb(80, 220, 80),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).title(" Lives "))
        .gauge_style(Style::default().fg(gauge_color).bg(Color::Rgb(30, 30, 40)))
        .ratio(f64::from(lives) / f64::from(MAX_LIVES))
        .label(format!("{lives} / {MAX_LIVES}"));
    frame.render_widget(gauge, chunks[2]);

    let guessed: Vec<String> = round.guessed_letters().iter().map(char::to_string).collect();
    let details = vec![
        Line::from(vec![
            Span::styled("  Lives left: ", Style::default().fg(Color::Rgb(140, 140, 140))),
            Span::styled(
                format!("{} ", "♥ ".repeat(lives as usize)),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Guessed letters: ", Style::default().fg(Color::Rgb(140, 140, 140))),
            Span::styled(guessed.join(", "), Style::default().fg(Color::Rgb(80, 200, 255))),
        ]),
        Line::from(vec![
            Span::styled("  💡 Hint: the word is related to ", Style::default().fg(Color::Rgb(140, 140, 140))),
            Span::styled(
                round.category().to_string(),
                Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(details), chunks[3]);

    let mut help = vec![Span::raw(" ")];
    match round.status() {
        RoundStatus::InProgress => {
            let input = Paragraph::new(Line::from(vec![
                Span::styled("  Enter a letter: ", Style::default().fg(Color::Rgb(180, 180, 200))),
                Span::styled("[ ", Style::default().fg(Color::Rgb(100, 100, 130))),
                Span::styled(
                    if app.guess_input.is_empty() { "_".to_string() } else { app.guess_input.clone() },
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" ]", Style::default().fg(Color::Rgb(100, 100, 130))),
            ]))
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
            frame.render_widget(input, chunks[4]);

            help.extend(key_hint("A-Z", " type  "));
            help.extend(key_hint("Enter", " guess  "));
            help.extend(key_hint("Backspace", " clear  "));
            help.extend(key_hint("Esc", " exit game"));
        }
        status => {
            let (text, color) = if status == RoundStatus::Won {
                (
                    format!("🎉 You won! The word was {}.", round.secret_word()),
                    Color::Rgb(80, 220, 80),
                )
            } else {
                (
                    format!("💀 You lost! The word was {}.", round.secret_word()),
                    Color::Rgb(230, 80, 80),
                )
            };
            let banner = Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(color)),
            );
            frame.render_widget(banner, chunks[4]);

            help.extend(key_hint("Enter", " play again  "));
            help.extend(key_hint("Esc", " exit game"));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(help)), chunks[5]);
}

fn feedback_line(feedback: &Feedback) -> Line<'static> {
    let (icon, color) = match feedback {
        Feedback::None => return Line::from(""),
        Feedback::Correct => ("✅ ", Color::Rgb(80, 220, 80)),
        Feedback::Wrong => ("❌ ", Color::Rgb(230, 80, 80)),
        Feedback::Warning(_) => ("⚠ ", Color::Rgb(255, 200, 80)),
    };
    Line::from(vec![
        Span::styled(format!("  {icon}"), Style::default()),
        Span::styled(
            feedback.message(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let record = app.controller.player(session.player()).copied().unwrap_or_default();
    let stats = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("  👤 ", Style::default()),
            Span::styled(
                session.player().to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  ⭐ Score: ", Style::default().fg(Color::Rgb(140, 140, 140))),
            Span::styled(record.score.to_string(), Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("  ✅ Wins: ", Style::default().fg(Color::Rgb(140, 140, 140))),
            Span::styled(record.wins.to_string(), Style::default().fg(Color::Rgb(80, 220, 80)).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("  ❌ Losses: ", Style::default().fg(Color::Rgb(140, 140, 140))),
            Span::styled(record.losses.to_string(), Style::default().fg(Color::Rgb(230, 80, 80)).add_modifier(Modifier::BOLD)),
        ]),
    ])
    .block(panel(" 🏆 Player Stats "));
    frame.render_widget(stats, rows[0]);

    let medal_colors = [
        Color::Rgb(255, 215, 0),   // Gold
        Color::Rgb(192, 192, 192), // Silver
        Color::Rgb(205, 127, 50),  // Bronze
    ];
    let mut lines = vec![Line::from("")];
    let board = app.controller.leaderboard_default();
    if board.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No scores yet",
            Style::default().fg(Color::Rgb(60, 60, 80)),
        )));
    }
    for (rank, (name, record)) in board.into_iter().enumerate() {
        let color = medal_colors.get(rank).copied().unwrap_or(Color::Rgb(200, 200, 220));
        let highlight = if name == session.player() { Modifier::BOLD } else { Modifier::empty() };
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", rank + 1), Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(
                format!("{name:<12} "),
                Style::default().fg(Color::Rgb(200, 200, 220)).add_modifier(highlight),
            ),
            Span::styled(
                format!("{} pts", record.score),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).block(panel(" 🌍 Leaderboard ")), rows[1]);
}
