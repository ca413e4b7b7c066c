use ratatui::prelude::*;
use ratatui::widgets::*;

use super::panel;
use crate::app::{AdminTab, App, Tab};

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = Tab::all().iter().map(|t| (t.title(), *t == app.current_tab));
    let tabs = tab_strip(titles, app.current_tab.index())
        .block(panel(" 🔤 Quiz Guess "))
        .style(Style::default().fg(Color::White));

    frame.render_widget(tabs, area);
}

/// Add / View / Remove strip shown inside the admin dashboard.
pub fn render_admin_tabs(frame: &mut Frame, current: AdminTab, area: Rect) {
    let titles = AdminTab::all().iter().map(|t| (t.title(), *t == current));
    frame.render_widget(tab_strip(titles, current.index()), area);
}

fn tab_strip<'a>(titles: impl Iterator<Item = (&'a str, bool)>, selected: usize) -> Tabs<'a> {
    Tabs::new(titles.map(|(title, on)| tab_title(title, on)).collect::<Vec<_>>())
        .select(selected)
        .highlight_style(selected_style())
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))))
}

fn tab_title(title: &str, selected: bool) -> Line<'_> {
    let style = if selected {
        selected_style()
    } else {
        Style::default().fg(Color::Rgb(120, 120, 140))
    };
    Line::from(Span::styled(title, style))
}

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Rgb(255, 220, 80))
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: impl Widget, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_tab_strip_lists_every_title() {
        let titles = AdminTab::all().iter().map(|t| (t.title(), *t == AdminTab::View));
        let text = rendered(tab_strip(titles, AdminTab::View.index()), 80, 1);
        for label in ["Add Words", "View Words", "Remove Words"] {
            assert!(text.contains(label), "missing {label} in {text:?}");
        }
    }

    #[test]
    fn test_selected_title_is_highlighted() {
        let on = tab_title("Play", true);
        let off = tab_title("Play", false);
        assert_eq!(on.spans[0].style.fg, Some(Color::Rgb(255, 220, 80)));
        assert_ne!(on.spans[0].style, off.spans[0].style);
    }
}
