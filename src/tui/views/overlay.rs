// Event detail overlay
//
// Drawn over the listing. The body scrolls with the overlay's own
// ScrollState; the gallery shows the selected image URL and numbered
// thumbnails that 1-9 select.

use crate::format::{
    capacity_label, category_accent, category_icon, category_name, event_kind, event_kind_icon,
    fee_label, format_date, format_time_range, subcategory_name, team_size_label,
};
use crate::model::non_empty;
use crate::tui::app::App;
use crate::tui::components::scrollbar::render_scrollbar;
use crate::tui::layout::centered_percent;
use crate::tui::overlay::{event_rules, GENERAL_RULES};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &mut App) {
    let theme = &app.theme;
    let locale = app.locale;
    let Some(listing) = app.listing.as_mut() else {
        return;
    };
    let Some(overlay) = listing.overlay.as_mut() else {
        return;
    };
    let Some(event) = listing
        .load
        .ready()
        .and_then(|l| l.events.get(overlay.event_index))
    else {
        return;
    };

    let area = centered_percent(85, 85, (50, 16), f.area());
    f.render_widget(Clear, area);

    let label = Style::default()
        .fg(theme.muted)
        .add_modifier(Modifier::BOLD);
    let value = Style::default().fg(theme.foreground);
    let header = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);
    let field = |name: &'static str, text: String| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {:<11}", name), label),
            Span::styled(text, value),
        ])
    };

    let category = category_name(event.category.as_ref());
    let accent = theme.accent(category_accent(category));
    let kind = event_kind(event.team_size.as_ref(), event.event_type.as_deref());

    let mut lines = Vec::new();

    // Badges
    let mut badges = vec![
        Span::raw("  "),
        Span::styled(
            format!(" {} {} ", category_icon(category).glyph(), category),
            Style::default().fg(accent).add_modifier(Modifier::REVERSED),
        ),
    ];
    if let Some(sub) = subcategory_name(event.sub_category.as_ref()) {
        badges.push(Span::raw(" "));
        badges.push(Span::styled(
            format!(" {} ", sub),
            Style::default().fg(theme.muted).add_modifier(Modifier::REVERSED),
        ));
    }
    badges.push(Span::raw(" "));
    badges.push(Span::styled(
        format!(
            "{} {}",
            event_kind_icon(event.event_type.as_deref()).glyph(),
            kind.label()
        ),
        Style::default().fg(theme.title),
    ));
    lines.push(Line::from(badges));
    lines.push(Line::raw(""));

    // Facts
    let date = format_date(event.start_time.as_deref(), locale);
    let time = format_time_range(
        event.start_time.as_deref(),
        event.end_time.as_deref(),
        locale,
    );
    lines.push(field("Date", date));
    if !time.is_empty() {
        lines.push(field("Time", time));
    }
    if let Some(venue) = non_empty(event.venue_name.as_ref()) {
        lines.push(field("Venue", venue.to_string()));
    }
    lines.push(field("Fee", fee_label(event.fee.as_ref())));
    lines.push(field(
        "Capacity",
        format!("{} participants", capacity_label(event.capacity)),
    ));
    lines.push(field("Team size", team_size_label(event.team_size.as_ref())));
    lines.push(Line::raw(""));

    // Description
    lines.push(Line::styled("  About", header));
    let description = non_empty(event.description.as_ref()).unwrap_or("No description available");
    for text in description.lines() {
        lines.push(Line::styled(format!("  {}", text), value));
    }
    lines.push(Line::raw(""));

    // Gallery
    lines.push(Line::styled("  Gallery", header));
    lines.push(Line::from(vec![
        Span::styled("  ▣ ", Style::default().fg(accent)),
        Span::styled(
            overlay.main_image().to_string(),
            value.add_modifier(Modifier::UNDERLINED),
        ),
    ]));
    if overlay.images.len() > 1 {
        let mut thumbs = vec![Span::raw("  ")];
        for (i, _) in overlay.images.iter().enumerate() {
            let style = if i == overlay.selected_image() {
                Style::default()
                    .bg(theme.highlight)
                    .fg(theme.selection_fg)
            } else {
                Style::default().fg(theme.muted)
            };
            thumbs.push(Span::styled(format!(" {} ", i + 1), style));
            thumbs.push(Span::raw(" "));
        }
        lines.push(Line::from(thumbs));
    }
    lines.push(Line::raw(""));

    // Rules
    let general_marker = if overlay.general_rules_open { "▾" } else { "▸" };
    lines.push(Line::styled(
        format!("  {} General Rules (g)", general_marker),
        header,
    ));
    if overlay.general_rules_open {
        for (i, rule) in GENERAL_RULES.iter().enumerate() {
            lines.push(Line::styled(format!("    {}. {}", i + 1, rule), value));
        }
    }
    let event_marker = if overlay.event_rules_open { "▾" } else { "▸" };
    lines.push(Line::styled(
        format!("  {} Event Rules (r)", event_marker),
        header,
    ));
    if overlay.event_rules_open {
        for (i, rule) in event_rules(event).iter().enumerate() {
            lines.push(Line::styled(format!("    {}. {}", i + 1, rule), value));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight))
        .style(Style::default().bg(theme.background))
        .title(Span::styled(
            format!(" {} ", event.display_title()),
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::from(" ←/→ image │ g/r rules │ y copy │ Esc close ").centered(),
        );

    let inner = block.inner(area);
    overlay
        .scroll
        .update_dimensions(wrapped_height(&lines, inner.width), inner.height as usize);

    let body = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((overlay.scroll.offset() as u16, 0));
    f.render_widget(body, area);
    render_scrollbar(f, inner_right(area), &overlay.scroll, theme.border);
}

/// Rows the lines take once wrapped at `width`
fn wrapped_height(lines: &[Line], width: u16) -> usize {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum()
}

/// The overlay area minus its top and bottom border rows
fn inner_right(area: Rect) -> Rect {
    Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(2))
}
