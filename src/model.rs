//! Festival data model as served by the REST API
//!
//! The backend is loose about shapes: a category reference can be a bare id or
//! an embedded record, images can be URLs or objects, numbers sometimes arrive
//! as strings. Everything here deserializes without failing on those
//! irregularities. Untagged enums keep the raw shape, and the accessor methods
//! are the single place where it gets normalized.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Deserialize a field, falling back to `Default` when the JSON has the wrong type.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A number sent either as a JSON number or as a numeric string.
/// Anything else, negative counts included, reads as absent.
fn numeric<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + FromStr,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text.trim().parse().ok(),
        value @ Value::Number(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Free text that the server sometimes sends as a number or boolean
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Treat empty strings like absent values (the API uses both)
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Categories
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level grouping for events (Technical, Cultural, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

impl Category {
    /// Display name: `name`, then `title`
    pub fn label(&self) -> Option<&str> {
        non_empty(self.name.as_ref()).or_else(|| non_empty(self.title.as_ref()))
    }
}

/// An event's category: either the category id or the embedded record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(String),
    Embedded(Category),
    Other(Value),
}

impl CategoryRef {
    /// Identifier of the referenced category, whichever shape it arrived in
    pub fn id(&self) -> Option<&str> {
        match self {
            CategoryRef::Id(id) => Some(id.as_str()),
            CategoryRef::Embedded(category) => non_empty(category.id.as_ref()),
            CategoryRef::Other(_) => None,
        }
    }

    /// Display name carried by an embedded record (bare ids carry none)
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            CategoryRef::Embedded(category) => category.label(),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subcategories
// ─────────────────────────────────────────────────────────────────────────────

/// Optional finer-grained grouping under a category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubCategory {
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubCategoryRef {
    Name(String),
    Embedded(SubCategory),
    Other(Value),
}

// ─────────────────────────────────────────────────────────────────────────────
// Images
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageObject {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub src: Option<String>,
    #[serde(rename = "imageUrl", default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
}

/// One entry of an event's image list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    Object(ImageObject),
    Other(Value),
}

impl ImageRef {
    /// The URL this entry points at: the string itself, or `url`, `src`, `imageUrl`
    pub fn resolve(&self) -> Option<&str> {
        match self {
            ImageRef::Url(url) => Some(url.as_str()).filter(|s| !s.is_empty()),
            ImageRef::Object(image) => non_empty(image.url.as_ref())
                .or_else(|| non_empty(image.src.as_ref()))
                .or_else(|| non_empty(image.image_url.as_ref())),
            ImageRef::Other(_) => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// Allowed team size for an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSize {
    #[serde(default, deserialize_with = "numeric")]
    pub min: Option<u32>,
    #[serde(default, deserialize_with = "numeric")]
    pub max: Option<u32>,
}

/// Entry fee as sent: an amount, or text the server put in its place
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fee {
    Amount(f64),
    Text(String),
}

impl Fee {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Fee::Amount),
            Value::String(text) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else if let Ok(amount) = text.parse::<f64>() {
                    Some(Fee::Amount(amount))
                } else {
                    Some(Fee::Text(text.to_string()))
                }
            }
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Fee {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Fee::from_value(value.clone()).ok_or_else(|| {
            serde::de::Error::custom(format!("expected a fee amount, got {}", value))
        })
    }
}

/// A festival event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub sub_category: Option<SubCategoryRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub images: Vec<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub venue_name: Option<String>,
    /// Entry fee; zero means free
    #[serde(default, deserialize_with = "lenient")]
    pub fee: Option<Fee>,
    #[serde(default, deserialize_with = "numeric")]
    pub capacity: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub team_size: Option<TeamSize>,
    /// Free text such as "Solo", "Team Event"
    #[serde(default, deserialize_with = "lenient")]
    pub event_type: Option<String>,
    /// Event-specific rules; the overlay falls back to a built-in list
    #[serde(default, deserialize_with = "lenient")]
    pub rules: Vec<String>,
}

impl Event {
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_ref()).unwrap_or("Untitled Event")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response envelope
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
}

/// `{ "data": [...] }` collection wrapper that keeps the entries it can read and skips the rest.
///
/// `data` that is missing, null or not a list reads as empty.
#[derive(Debug)]
pub struct ListEnvelope<T>(pub Vec<T>);

impl<'de, T: DeserializeOwned> Deserialize<'de> for ListEnvelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let envelope = Envelope::deserialize(deserializer)?;
        let Some(Value::Array(entries)) = envelope.data else {
            return Ok(ListEnvelope(Vec::new()));
        };

        let total = entries.len();
        let items: Vec<T> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if items.len() < total {
            tracing::warn!(
                skipped = total - items.len(),
                "Skipped malformed entries in collection"
            );
        }
        Ok(ListEnvelope(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_ref_shapes() {
        let event: Event = serde_json::from_value(json!({
            "_id": "e1",
            "category": "c1"
        }))
        .unwrap();
        let category = event.category.unwrap();
        assert_eq!(category.id(), Some("c1"));
        assert_eq!(category.embedded_name(), None);

        let event: Event = serde_json::from_value(json!({
            "_id": "e2",
            "category": { "_id": "c2", "name": "Cultural" }
        }))
        .unwrap();
        let category = event.category.unwrap();
        assert_eq!(category.id(), Some("c2"));
        assert_eq!(category.embedded_name(), Some("Cultural"));
    }

    #[test]
    fn test_irregular_fields_do_not_fail() {
        let event: Event = serde_json::from_value(json!({
            "_id": "e3",
            "title": "Robo Race",
            "category": 42,
            "images": "not-a-list",
            "fee": "free",
            "capacity": -3,
            "teamSize": { "min": "two", "max": 4 },
            "rules": null
        }))
        .unwrap();

        assert_eq!(event.title.as_deref(), Some("Robo Race"));
        assert!(matches!(event.category, Some(CategoryRef::Other(_))));
        assert!(event.images.is_empty());
        assert_eq!(event.fee, Some(Fee::Text("free".to_string())));
        assert_eq!(event.capacity, None);
        assert_eq!(
            event.team_size,
            Some(TeamSize {
                min: None,
                max: Some(4)
            })
        );
        assert!(event.rules.is_empty());
    }

    #[test]
    fn test_null_category_is_absent() {
        let event: Event = serde_json::from_value(json!({ "category": null })).unwrap();
        assert!(event.category.is_none());
        assert_eq!(event.display_title(), "Untitled Event");
    }

    #[test]
    fn test_image_ref_resolution_order() {
        let images: Vec<ImageRef> = serde_json::from_value(json!([
            "https://cdn/a.png",
            { "src": "https://cdn/b.png", "imageUrl": "https://cdn/ignored.png" },
            { "url": "", "imageUrl": "https://cdn/c.png" },
            { "alt": "no url" },
            7
        ]))
        .unwrap();

        let resolved: Vec<_> = images.iter().map(ImageRef::resolve).collect();
        assert_eq!(
            resolved,
            vec![
                Some("https://cdn/a.png"),
                Some("https://cdn/b.png"),
                Some("https://cdn/c.png"),
                None,
                None
            ]
        );
    }

    #[test]
    fn test_envelope_missing_data_is_empty() {
        for body in [json!({}), json!({ "data": null }), json!({ "data": "oops" })] {
            let envelope: ListEnvelope<Event> = serde_json::from_value(body).unwrap();
            assert!(envelope.0.is_empty());
        }
    }

    #[test]
    fn test_envelope_skips_malformed_entries() {
        let envelope: ListEnvelope<Event> = serde_json::from_value(json!({
            "data": [{ "_id": "e1" }, null, 7, "e2", { "_id": "e3", "title": "Quiz" }]
        }))
        .unwrap();

        let ids: Vec<_> = envelope.0.iter().map(|e| e.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("e1"), Some("e3")]);
    }

    #[test]
    fn test_numeric_strings_are_read() {
        let event: Event = serde_json::from_value(json!({
            "fee": "150",
            "capacity": " 60 ",
            "teamSize": { "min": "2", "max": "4" }
        }))
        .unwrap();

        assert_eq!(event.fee, Some(Fee::Amount(150.0)));
        assert_eq!(event.capacity, Some(60));
        assert_eq!(
            event.team_size,
            Some(TeamSize {
                min: Some(2),
                max: Some(4)
            })
        );

        let event: Event = serde_json::from_value(json!({ "fee": "" })).unwrap();
        assert_eq!(event.fee, None);
    }
}
