// Home view: "All Events" followed by one row per category

use crate::format::{category_accent, category_icon, Icon, UNCATEGORIZED};
use crate::tui::app::{App, LoadState};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Categories ");

    match &app.home.load {
        LoadState::Loading => {
            let text = Paragraph::new(format!("{} Loading categories...", app.spinner_char()))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted))
                .block(block);
            f.render_widget(text, area);
            return;
        }
        LoadState::Failed => {
            let text = Paragraph::new(vec![
                Line::styled("Failed to load categories", Style::default().fg(theme.error)),
                Line::styled("Press r to retry", Style::default().fg(theme.muted)),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
            f.render_widget(text, area);
            return;
        }
        LoadState::Ready(_) => {}
    }

    let desc_style = Style::default().fg(theme.muted);
    let mut items = vec![ListItem::new(Line::from(vec![
        Span::styled(
            format!(" {} ", Icon::Sparkles.glyph()),
            Style::default().fg(theme.highlight),
        ),
        Span::styled(
            "All Events",
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Explore all upcoming events", desc_style),
    ]))];

    for category in app.home.selectable() {
        let name = category.label().unwrap_or(UNCATEGORIZED);
        let accent = theme.accent(category_accent(name));
        let mut spans = vec![
            Span::styled(
                format!(" {} ", category_icon(name).glyph()),
                Style::default().fg(accent),
            ),
            Span::styled(
                name.to_string(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(description) = category.description.as_deref().filter(|d| !d.is_empty()) {
            spans.push(Span::styled(format!("  {}", description), desc_style));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(theme.selection)
            .fg(theme.selection_fg),
    );

    let mut state = ListState::default().with_selected(Some(app.home.selected));
    f.render_stateful_widget(list, area, &mut state);
}
