//! Category filter for the event listing
//!
//! The filtered view is always derived from the full collection; nothing here
//! mutates the events it is given.

use crate::format::{category_icon, Icon, UNCATEGORIZED};
use crate::model::{Category, Event};
use std::fmt;

/// Sentinel id of the "All" filter
pub const ALL: &str = "all";

/// Which events the listing shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterId {
    #[default]
    All,
    Category(String),
}

impl FilterId {
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            FilterId::All
        } else {
            FilterId::Category(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterId::All => ALL,
            FilterId::Category(id) => id,
        }
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chip in the filter bar
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub id: FilterId,
    pub label: String,
    pub icon: Icon,
}

impl FilterOption {
    fn all() -> Self {
        Self {
            id: FilterId::All,
            label: "All".to_string(),
            icon: Icon::Filter,
        }
    }
}

/// "All" first, then one option per catalog category in catalog order.
///
/// Categories without an id cannot be selected and are left out.
pub fn build_filter_options(categories: &[Category]) -> Vec<FilterOption> {
    let mut options = Vec::with_capacity(categories.len() + 1);
    options.push(FilterOption::all());

    for category in categories {
        let Some(id) = category.id.as_deref().filter(|id| !id.is_empty()) else {
            tracing::debug!("Skipping category without id: {:?}", category.label());
            continue;
        };
        let label = category.label().unwrap_or(UNCATEGORIZED);
        options.push(FilterOption {
            id: FilterId::Category(id.to_string()),
            label: label.to_string(),
            icon: category_icon(label),
        });
    }

    options
}

/// Whether an event belongs to a category filter.
///
/// Matches on the category id, or falls back to the embedded category name
/// containing the filter id (case-insensitive). Both paths are needed because
/// references arrive as ids or as loosely named records.
pub fn matches(event: &Event, filter_id: &str) -> bool {
    let Some(category) = event.category.as_ref() else {
        return false;
    };
    if category.id() == Some(filter_id) {
        return true;
    }
    let name = category.embedded_name().unwrap_or_default().to_lowercase();
    name.contains(&filter_id.to_lowercase())
}

/// Indices into `events` of the events the filter keeps, in original order
pub fn filter_indices(events: &[Event], filter: &FilterId) -> Vec<usize> {
    match filter {
        FilterId::All => (0..events.len()).collect(),
        FilterId::Category(id) => events
            .iter()
            .enumerate()
            .filter(|(_, event)| matches(event, id))
            .map(|(idx, _)| idx)
            .collect(),
    }
}

/// The filtered view as references into `events`
pub fn filter_events<'a>(events: &'a [Event], filter: &FilterId) -> Vec<&'a Event> {
    filter_indices(events, filter)
        .into_iter()
        .map(|idx| &events[idx])
        .collect()
}

/// "1 Event" / "N Events"
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 Event".to_string()
    } else {
        format!("{} Events", count)
    }
}

/// Message shown when the filtered view is empty
pub fn empty_message(filter: &FilterId, options: &[FilterOption]) -> String {
    match filter {
        FilterId::All => "No events are scheduled yet. Check back soon!".to_string(),
        FilterId::Category(_) => {
            let label = options
                .iter()
                .find(|option| &option.id == filter)
                .map(|option| option.label.as_str())
                .unwrap_or("");
            format!("No events found in \"{}\" category.", label)
        }
    }
}
