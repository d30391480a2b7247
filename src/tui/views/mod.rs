// Views: screen-level rendering
//
// - Home: category catalog used as navigation
// - Events: heading, filter chips and the event list for one route
// - Overlay: event details drawn over the listing
// - Modal: help and logs, drawn over everything but the toast

mod events;
mod home;
mod modal;
mod overlay;

use super::app::{App, View};
use crate::tui::components::{status_bar, title_bar};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Render one frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(2),
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], app);
    match app.view {
        View::Home => home::render(f, chunks[1], app),
        View::Events => events::render(f, chunks[1], app),
    }
    status_bar::render(f, chunks[2], app);

    if app.view == View::Events {
        overlay::render(f, app);
    }

    if let Some(modal) = app.modal {
        modal::render(f, modal, app);
    }

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    app.clear_expired_toast();
}
