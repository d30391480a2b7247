// Title bar: app name, current view, and a spinner while loading

use crate::tui::app::{App, View};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let location = match app.view {
        View::Home => "Home".to_string(),
        View::Events => app
            .listing
            .as_ref()
            .and_then(|l| l.load.ready())
            .map(|l| l.heading())
            .unwrap_or_else(|| View::Events.name().to_string()),
    };

    let status = if app.is_loading() {
        format!(" {} loading", app.spinner_char())
    } else {
        String::new()
    };

    let title = Paragraph::new(format!(" ✦ fest ──── {}{}", location, status))
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(format!(" {} ", app.api_url)).right_aligned()),
        );

    f.render_widget(title, area);
}
