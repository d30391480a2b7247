// Events view: heading, filter chips, and the filtered event list
//
// The list is drawn by hand from the page scroll offset so the overlay's
// scroll lock and the mouse wheel act on the same state.

use crate::filter::{count_label, empty_message};
use crate::format::{
    category_accent, category_icon, category_name, event_kind, event_kind_icon, fee_label,
    format_date, truncate_label,
};
use crate::loader::LOAD_FAILED;
use crate::model::Event;
use crate::theme::Theme;
use crate::tui::app::{App, LoadState};
use crate::tui::components::scrollbar::render_scrollbar;
use crate::tui::layout::Breakpoint;
use chrono::Locale;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let locale = app.locale;
    let spinner = app.spinner_char();
    let Some(listing) = app.listing.as_mut() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));

    let data = match &listing.load {
        LoadState::Loading => {
            let text = Paragraph::new(format!("{} Loading events...", spinner))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted))
                .block(list_block);
            f.render_widget(text, chunks[2]);
            return;
        }
        LoadState::Failed => {
            let text = Paragraph::new(vec![
                Line::styled(LOAD_FAILED, Style::default().fg(theme.error)),
                Line::styled("Press r to retry", Style::default().fg(theme.muted)),
            ])
            .alignment(Alignment::Center)
            .block(list_block);
            f.render_widget(text, chunks[2]);
            return;
        }
        LoadState::Ready(data) => data,
    };

    // Heading
    let header = Paragraph::new(vec![
        Line::styled(
            format!(" {}", data.heading()),
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            format!(" {}", data.subheading()),
            Style::default().fg(theme.muted),
        ),
    ]);
    f.render_widget(header, chunks[0]);

    // Filter chips
    let mut chips = Vec::new();
    for option in &data.filter_options {
        let label = format!(" {} {} ", option.icon.glyph(), truncate_label(&option.label));
        let style = if option.id == listing.filter {
            Style::default()
                .bg(theme.highlight)
                .fg(theme.selection_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };
        chips.push(Span::styled(label, style));
        chips.push(Span::raw(" "));
    }
    let chip_bar = Paragraph::new(Line::from(chips)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Filter "),
    );
    f.render_widget(chip_bar, chunks[1]);

    // Event list
    let list_block = list_block.title(format!(" {} ", count_label(listing.visible.len())));
    let inner = list_block.inner(chunks[2]);
    f.render_widget(list_block, chunks[2]);

    if listing.visible.is_empty() {
        let text = Paragraph::new(empty_message(&listing.filter, &data.filter_options))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(theme.muted));
        f.render_widget(text, inner);
        return;
    }

    let viewport = inner.height as usize;
    listing
        .page
        .state
        .update_dimensions(listing.visible.len(), viewport);
    let offset = listing.page.state.offset();
    let bp = Breakpoint::from_width(inner.width);

    let lines: Vec<Line> = listing
        .visible
        .iter()
        .enumerate()
        .skip(offset)
        .take(viewport)
        .filter_map(|(pos, &idx)| {
            let event = data.events.get(idx)?;
            Some(event_line(
                event,
                pos == listing.selected,
                bp,
                inner.width,
                theme,
                locale,
            ))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
    render_scrollbar(f, chunks[2], &listing.page.state, theme.border);
}

/// One list row: kind icon, title, then category/date/fee/kind as space allows
fn event_line<'a>(
    event: &'a Event,
    selected: bool,
    bp: Breakpoint,
    width: u16,
    theme: &Theme,
    locale: Locale,
) -> Line<'a> {
    let category = category_name(event.category.as_ref());
    let accent = theme.accent(category_accent(category));
    let kind = event_kind(event.team_size.as_ref(), event.event_type.as_deref());
    let date = format_date(event.start_time.as_deref(), locale);
    let fee = fee_label(event.fee.as_ref());

    let base = if selected {
        Style::default().bg(theme.selection).fg(theme.selection_fg)
    } else {
        Style::default().fg(theme.foreground)
    };
    let marker = if selected { "▸ " } else { "  " };

    let mut spans = vec![
        Span::styled(marker, base.fg(theme.highlight)),
        Span::styled(
            format!("{} ", event_kind_icon(event.event_type.as_deref()).glyph()),
            base.fg(accent),
        ),
    ];

    if bp == Breakpoint::Compact {
        spans.push(Span::styled(
            event.display_title(),
            base.add_modifier(Modifier::BOLD),
        ));
        return Line::from(spans).style(base);
    }

    // Badge, date, fee and kind take a fixed share; the title gets the rest
    let badge = format!(" {} {} ", category_icon(category).glyph(), category);
    let trailing = format!("  {}  {}  {}", date, fee, kind.label());
    let fixed = 4 + badge.width() + trailing.width() + 2;
    let title_width = (width as usize).saturating_sub(fixed).max(12);

    spans.push(Span::styled(
        fit(event.display_title(), title_width),
        base.add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(badge, base.fg(accent).add_modifier(Modifier::REVERSED)));
    if bp.at_least(Breakpoint::Normal) {
        spans.push(Span::styled(trailing, base.fg(theme.muted)));
    }

    Line::from(spans).style(base)
}

/// Pad or cut `text` to exactly `width` display columns
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        let pad = width - text.width();
        return format!("{}{}", text, " ".repeat(pad));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_cuts() {
        assert_eq!(fit("Hackathon", 12), "Hackathon   ");
        assert_eq!(fit("Battle of Bands", 8), "Battle …");
        assert_eq!(fit("Battle of Bands", 8).width(), 8);
    }
}
