// Help and log modals

use crate::tui::app::App;
use crate::tui::components::scrollbar::render_scrollbar;
use crate::tui::layout::{centered_percent, centered_rect};
use crate::tui::modal::Modal;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, modal: Modal, app: &mut App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Logs => render_logs(f, app),
    }
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.title);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Home", header_style)),
        kb("↑/↓, j/k", "Select category"),
        kb("Enter", "Open event listing"),
        Line::raw(""),
        Line::from(Span::styled("  Events", header_style)),
        kb("↑/↓, j/k", "Select event"),
        kb("Tab, →", "Next filter"),
        kb("S-Tab, ←", "Previous filter"),
        kb("Enter", "Event details"),
        kb("Esc", "Back to home"),
        Line::raw(""),
        Line::from(Span::styled("  Details", header_style)),
        kb("←/→, 1-9", "Change image"),
        kb("g / r", "Toggle general / event rules"),
        kb("y", "Copy details"),
        kb("Esc, x", "Close"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("r", "Reload"),
        kb("L", "Show logs (c clears)"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(app.theme.name.as_str(), key_style),
        ]),
    ]);

    let area = centered_rect(52, 30, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

fn render_logs(f: &mut Frame, app: &mut App) {
    let area = centered_percent(80, 70, (40, 10), f.area());
    f.render_widget(Clear, area);

    let entries = app.log_buffer.get_all();
    let lines: Vec<Line> = entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(app.theme.muted),
                ),
                Span::styled(
                    format!("{:<5} ", entry.level.as_str()),
                    Style::default().fg(app.theme.log_level(entry.level)),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(app.theme.foreground)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .border_type(app.theme.border_type)
        .style(Style::default().bg(app.theme.background))
        .title(format!(" Logs ({}) ", app.log_buffer.len()))
        .title_bottom(Line::from(" ↑/↓ scroll │ y copy │ c clear │ Esc close ").centered());

    let inner = block.inner(area);
    app.logs_scroll
        .update_dimensions(lines.len(), inner.height as usize);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.logs_scroll.offset() as u16, 0));
    f.render_widget(paragraph, area);
    render_scrollbar(f, area, &app.logs_scroll, app.theme.border);
}
