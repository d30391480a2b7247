//! Presentation formatting for categories and events
//!
//! Pure functions only. Each one tolerates missing or oddly-shaped input and
//! falls back to a fixed display value instead of failing.

use crate::model::{non_empty, CategoryRef, Event, Fee, ImageRef, SubCategoryRef, TeamSize};
use chrono::{DateTime, Local, Locale, NaiveDate, NaiveDateTime, TimeZone};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shown when an event has no usable image
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x200";

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Shown for missing or unparsable dates
pub const DATE_FALLBACK: &str = "Date not specified";

// ─────────────────────────────────────────────────────────────────────────────
// Category / subcategory names
// ─────────────────────────────────────────────────────────────────────────────

/// Display name of a category reference, defaulting to "Uncategorized"
pub fn category_name(category: Option<&CategoryRef>) -> &str {
    match category {
        Some(CategoryRef::Id(name)) if !name.is_empty() => name,
        Some(CategoryRef::Embedded(record)) => record.label().unwrap_or(UNCATEGORIZED),
        _ => UNCATEGORIZED,
    }
}

/// Display name of a subcategory, or `None` when there is nothing to badge
pub fn subcategory_name(sub_category: Option<&SubCategoryRef>) -> Option<&str> {
    match sub_category? {
        SubCategoryRef::Name(name) => Some(name.as_str()).filter(|s| !s.is_empty()),
        SubCategoryRef::Embedded(record) => {
            non_empty(record.title.as_ref()).or_else(|| non_empty(record.name.as_ref()))
        }
        SubCategoryRef::Other(_) => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Images
// ─────────────────────────────────────────────────────────────────────────────

/// Cover image: the first entry's URL, or the placeholder
pub fn image_url(images: &[ImageRef]) -> &str {
    images
        .first()
        .and_then(ImageRef::resolve)
        .unwrap_or(PLACEHOLDER_IMAGE)
}

/// Every resolvable image URL, in order, for the gallery
pub fn all_images(images: &[ImageRef]) -> Vec<String> {
    images
        .iter()
        .filter_map(ImageRef::resolve)
        .map(str::to_string)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Category icon / accent
// ─────────────────────────────────────────────────────────────────────────────

/// Icons used for filter chips, category badges and event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Filter,
    Target,
    Sparkles,
    Trophy,
    Palette,
    BookOpen,
    Utensils,
    Music,
    Users,
    User,
    Team,
    Tag,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Filter => "⛛",
            Icon::Target => "◎",
            Icon::Sparkles => "✦",
            Icon::Trophy => "♛",
            Icon::Palette => "✎",
            Icon::BookOpen => "▤",
            Icon::Utensils => "⑂",
            Icon::Music => "♪",
            Icon::Users => "⚇",
            Icon::User => "⚲",
            Icon::Team => "⚉",
            Icon::Tag => "◈",
        }
    }
}

/// Known category names, checked in this order
const CATEGORY_ICONS: &[(&str, Icon)] = &[
    ("technical", Icon::Target),
    ("cultural", Icon::Sparkles),
    ("sports", Icon::Trophy),
    ("fine arts", Icon::Palette),
    ("literary", Icon::BookOpen),
    ("hotel management", Icon::Utensils),
    ("other", Icon::Music),
    ("workshop", Icon::Target),
    ("competition", Icon::Trophy),
    ("seminar", Icon::BookOpen),
    ("concert", Icon::Music),
    ("exhibition", Icon::Palette),
    ("conference", Icon::Users),
    ("festival", Icon::Sparkles),
];

/// Broad keyword buckets for names that match nothing in the table
const KEYWORD_BUCKETS: &[(&[&str], Icon)] = &[
    (&["tech", "code", "program"], Icon::Target),
    (&["sport", "game", "athlet"], Icon::Trophy),
    (&["art", "design", "paint"], Icon::Palette),
    (&["music", "dance", "perform"], Icon::Music),
    (&["book", "write", "read"], Icon::BookOpen),
    (&["food", "hotel", "culinary"], Icon::Utensils),
];

/// Pick an icon for a category name.
///
/// Exact table match, then substring match in either direction, then the
/// keyword buckets, then `Icon::Tag`. A table entry always wins over a bucket.
pub fn category_icon(name: &str) -> Icon {
    if name.is_empty() {
        return Icon::Tag;
    }
    let lower = name.to_lowercase();

    if let Some((_, icon)) = CATEGORY_ICONS.iter().find(|(key, _)| lower == *key) {
        return *icon;
    }

    if let Some((_, icon)) = CATEGORY_ICONS
        .iter()
        .find(|(key, _)| lower.contains(key) || key.contains(lower.as_str()))
    {
        return *icon;
    }

    KEYWORD_BUCKETS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(Icon::Tag)
}

/// Color family for a category badge; the theme maps it to terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accent {
    Blue,
    Green,
    Pink,
    Violet,
    Amber,
    Orange,
    Slate,
    #[default]
    Festival,
}

const CATEGORY_ACCENTS: &[(&str, Accent)] = &[
    ("technical", Accent::Blue),
    ("sports", Accent::Green),
    ("cultural", Accent::Pink),
    ("fine arts", Accent::Violet),
    ("literary", Accent::Amber),
    ("hotel management", Accent::Orange),
    ("other", Accent::Slate),
];

/// Accent for a category name: first table key contained in the name
pub fn category_accent(name: &str) -> Accent {
    let lower = name.to_lowercase();
    CATEGORY_ACCENTS
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, accent)| *accent)
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Event kind
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Solo,
    Team,
    Event,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Solo => "SOLO",
            EventKind::Team => "TEAM",
            EventKind::Event => "EVENT",
        }
    }
}

/// Classify an event as solo or team: the event-type text wins, then team size
pub fn event_kind(team_size: Option<&TeamSize>, event_type: Option<&str>) -> EventKind {
    let event_type = event_type.map(str::to_lowercase).unwrap_or_default();
    if event_type.contains("solo") {
        return EventKind::Solo;
    }
    if event_type.contains("team") {
        return EventKind::Team;
    }

    match team_size {
        Some(TeamSize {
            min: Some(1),
            max: Some(1),
        }) => EventKind::Solo,
        Some(TeamSize { max: Some(max), .. }) if *max > 1 => EventKind::Team,
        _ => EventKind::Event,
    }
}

/// Icon for the event-type text alone
pub fn event_kind_icon(event_type: Option<&str>) -> Icon {
    let Some(event_type) = event_type.filter(|t| !t.is_empty()) else {
        return Icon::Users;
    };
    let lower = event_type.to_lowercase();
    if lower.contains("solo") {
        Icon::User
    } else if lower.contains("team") {
        Icon::Team
    } else {
        Icon::Users
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dates and times
// ─────────────────────────────────────────────────────────────────────────────

/// Parse the timestamp shapes the API produces, in the user's local time.
///
/// RFC 3339 values are converted from their offset; naive date-times and plain
/// dates are taken as local wall-clock time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    // Ambiguous wall-clock times (DST fold) resolve to the earlier instant
    Local.from_local_datetime(&naive).earliest()
}

/// "Thu, Feb 26, 2026" style date, or [`DATE_FALLBACK`]
pub fn format_date(raw: Option<&str>, locale: Locale) -> String {
    match raw.and_then(parse_timestamp) {
        Some(ts) => ts.format_localized("%a, %b %-d, %Y", locale).to_string(),
        None => DATE_FALLBACK.to_string(),
    }
}

/// "10:30 AM" style time, or an empty string
pub fn format_time(raw: Option<&str>, locale: Locale) -> String {
    match raw.and_then(parse_timestamp) {
        Some(ts) => ts.format_localized("%I:%M %p", locale).to_string(),
        None => String::new(),
    }
}

/// Start time, plus " - end" when the event has an end time
pub fn format_time_range(start: Option<&str>, end: Option<&str>, locale: Locale) -> String {
    let start = format_time(start, locale);
    let end = format_time(end, locale);
    if end.is_empty() {
        start
    } else {
        format!("{} - {}", start, end)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Event facts
// ─────────────────────────────────────────────────────────────────────────────

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

/// "₹150", or "₹0 (Free)" when the fee is zero or missing.
/// Non-numeric fee text is shown as sent.
pub fn fee_label(fee: Option<&Fee>) -> String {
    match fee {
        Some(Fee::Amount(amount)) if amount.is_finite() && *amount > 0.0 => {
            format!("₹{}", format_amount(*amount))
        }
        Some(Fee::Text(text)) => format!("₹{}", text),
        _ => "₹0 (Free)".to_string(),
    }
}

/// Participant cap, "Unlimited" when absent
pub fn capacity_label(capacity: Option<u32>) -> String {
    match capacity.filter(|c| *c > 0) {
        Some(capacity) => capacity.to_string(),
        None => "Unlimited".to_string(),
    }
}

/// "Solo" for exactly one participant, otherwise "min-max"
pub fn team_size_label(team_size: Option<&TeamSize>) -> String {
    let min = team_size.and_then(|t| t.min).filter(|m| *m > 0).unwrap_or(1);
    let max = team_size.and_then(|t| t.max).filter(|m| *m > 0).unwrap_or(1);
    if min == 1 && max == 1 {
        "Solo".to_string()
    } else {
        format!("{}-{}", min, max)
    }
}

/// Shorten long chip labels: more than 12 columns become 10 columns + "..."
pub fn truncate_label(label: &str) -> String {
    if label.width() <= 12 {
        return label.to_string();
    }

    let mut width = 0;
    let mut out = String::new();
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > 10 {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Plain-text rendering of an event, used for clipboard copies and headless output
pub fn event_summary(event: &Event, locale: Locale) -> String {
    let category = category_name(event.category.as_ref());
    let mut lines = vec![
        event.display_title().to_string(),
        format!(
            "{} {} | {}",
            category_icon(category).glyph(),
            category,
            event_kind(event.team_size.as_ref(), event.event_type.as_deref()).label()
        ),
    ];

    if let Some(sub) = subcategory_name(event.sub_category.as_ref()) {
        lines.push(format!("Subcategory: {}", sub));
    }

    let time = format_time_range(
        event.start_time.as_deref(),
        event.end_time.as_deref(),
        locale,
    );
    let date = format_date(event.start_time.as_deref(), locale);
    if time.is_empty() {
        lines.push(format!("When: {}", date));
    } else {
        lines.push(format!("When: {} {}", date, time));
    }

    if let Some(venue) = non_empty(event.venue_name.as_ref()) {
        lines.push(format!("Venue: {}", venue));
    }
    lines.push(format!("Fee: {}", fee_label(event.fee.as_ref())));
    lines.push(format!(
        "Capacity: {} participants",
        capacity_label(event.capacity)
    ));
    lines.push(format!(
        "Team size: {}",
        team_size_label(event.team_size.as_ref())
    ));
    lines.push(String::new());
    lines.push(
        non_empty(event.description.as_ref())
            .unwrap_or("No description available")
            .to_string(),
    );

    lines.join("\n")
}
