// Status bar: key hints for the current view, event count, uptime
//
// Narrow terminals get the short hint set.

use crate::filter::count_label;
use crate::tui::app::{App, View};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let wide = bp.at_least(Breakpoint::Wide);

    let overlay_open = app
        .listing
        .as_ref()
        .is_some_and(|l| l.overlay.is_some());

    let hints = match (app.view, overlay_open, wide) {
        (_, true, true) => "←/→ image │ 1-9 pick │ g/r rules │ y copy │ Esc close",
        (_, true, false) => "←→ img │ g/r │ Esc",
        (View::Home, _, true) => "↑/↓ select │ Enter open │ r reload │ L logs │ ? help │ q quit",
        (View::Home, _, false) => "↑↓ │ Enter │ ? │ q",
        (View::Events, _, true) => {
            "↑/↓ select │ Tab/←/→ filter │ Enter details │ Esc home │ r reload │ ? help"
        }
        (View::Events, _, false) => "↑↓ │ Tab │ Enter │ Esc │ ?",
    };

    let count = app
        .listing
        .as_ref()
        .filter(|l| app.view == View::Events && l.load.ready().is_some())
        .map(|l| format!(" │ {}", count_label(l.visible.len())))
        .unwrap_or_default();

    let status_text = if bp == Breakpoint::Compact {
        format!(" {}{}", hints, count)
    } else {
        format!(" {} │ {}{}", app.uptime(), hints, count)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
