//! Catalog and event loaders
//!
//! The TUI never awaits the network itself. It hands a [`LoadRequest`] to
//! [`spawn`], which runs the fetch on the runtime and sends the [`Loaded`]
//! result back over the app's channel. Every request carries the generation it
//! was issued for; the app drops results whose generation is no longer current.

use crate::api::{ApiClient, ApiError};
use crate::filter::{build_filter_options, FilterOption};
use crate::model::{Category, Event};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Banner shown for any listing load failure
pub const LOAD_FAILED: &str = "Failed to load events";

/// Scope of the events listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    All,
    Category(String),
}

impl Route {
    pub fn category_id(&self) -> Option<&str> {
        match self {
            Route::All => None,
            Route::Category(id) => Some(id),
        }
    }
}

/// Everything the listing view needs for one route
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub route: Route,
    pub categories: Vec<Category>,
    pub filter_options: Vec<FilterOption>,
    pub events: Vec<Event>,
    /// Catalog record of the route's category, when scoped and found
    pub scoped_category: Option<Category>,
}

impl Listing {
    pub fn new(route: Route, categories: Vec<Category>, events: Vec<Event>) -> Self {
        let scoped_category = route.category_id().and_then(|id| {
            categories
                .iter()
                .find(|c| c.id.as_deref() == Some(id))
                .cloned()
        });
        let filter_options = build_filter_options(&categories);

        Self {
            route,
            categories,
            filter_options,
            events,
            scoped_category,
        }
    }

    /// Page heading: "All Events" or the scoped category's name
    pub fn heading(&self) -> String {
        match (&self.route, &self.scoped_category) {
            (Route::All, _) => "All Events".to_string(),
            (Route::Category(_), Some(category)) => {
                category.label().unwrap_or("Events").to_string()
            }
            (Route::Category(id), None) => id.clone(),
        }
    }

    pub fn subheading(&self) -> String {
        match &self.scoped_category {
            None if self.route == Route::All => "Explore all upcoming events".to_string(),
            Some(category) => match category.description.as_deref().filter(|d| !d.is_empty()) {
                Some(description) => description.to_string(),
                None => format!("Events in {}", category.label().unwrap_or("this category")),
            },
            None => format!("Events in {}", self.heading()),
        }
    }
}

/// Fetch the catalog and the route's events concurrently
pub async fn load_listing(api: &ApiClient, route: Route) -> Result<Listing, ApiError> {
    let (categories, events) =
        tokio::try_join!(api.categories(), api.events(route.category_id()))?;

    tracing::debug!(
        "Loaded {} categories and {} events for {:?}",
        categories.len(),
        events.len(),
        route
    );
    Ok(Listing::new(route, categories, events))
}

// ─────────────────────────────────────────────────────────────────────────────
// Background loads
// ─────────────────────────────────────────────────────────────────────────────

/// Work the app asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    /// Category catalog for the home view
    Catalog { generation: u64 },
    /// Listing for the events view
    Listing { generation: u64, route: Route },
}

impl LoadRequest {
    pub fn generation(&self) -> u64 {
        match self {
            LoadRequest::Catalog { generation } | LoadRequest::Listing { generation, .. } => {
                *generation
            }
        }
    }
}

/// Result delivered back to the app
#[derive(Debug)]
pub enum Loaded {
    Catalog {
        generation: u64,
        result: Result<Vec<Category>, ApiError>,
    },
    Listing {
        generation: u64,
        result: Result<Listing, ApiError>,
    },
}

impl Loaded {
    pub fn generation(&self) -> u64 {
        match self {
            Loaded::Catalog { generation, .. } | Loaded::Listing { generation, .. } => *generation,
        }
    }
}

/// Run `request` on the runtime; the result goes to `tx`
pub fn spawn(
    api: Arc<ApiClient>,
    request: LoadRequest,
    tx: mpsc::Sender<Loaded>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let loaded = match request {
            LoadRequest::Catalog { generation } => {
                let result = api.categories().await;
                if let Err(e) = &result {
                    tracing::error!("Category catalog load failed: {}", e);
                }
                Loaded::Catalog { generation, result }
            }
            LoadRequest::Listing { generation, route } => {
                let result = load_listing(&api, route).await;
                if let Err(e) = &result {
                    tracing::error!("Listing load failed: {}", e);
                }
                Loaded::Listing { generation, result }
            }
        };

        // Receiver is gone when the app has quit
        if tx.send(loaded).await.is_err() {
            tracing::debug!("Dropping load result, app channel closed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::time::Duration;

    fn categories_json() -> serde_json::Value {
        json!({ "data": [
            { "_id": "c1", "name": "Technical", "description": "Build things" },
            { "_id": "c2", "name": "Cultural" }
        ]})
    }

    async fn api_for(router: Router) -> ApiClient {
        let base = test_server::spawn(router).await;
        ApiClient::new(&base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_headings() {
        let categories: Vec<Category> =
            serde_json::from_value(categories_json()["data"].clone()).unwrap();

        let all = Listing::new(Route::All, categories.clone(), vec![]);
        assert_eq!(all.heading(), "All Events");
        assert_eq!(all.subheading(), "Explore all upcoming events");
        assert_eq!(all.filter_options.len(), 3);

        let tech = Listing::new(Route::Category("c1".into()), categories.clone(), vec![]);
        assert_eq!(tech.heading(), "Technical");
        assert_eq!(tech.subheading(), "Build things");

        let cultural = Listing::new(Route::Category("c2".into()), categories, vec![]);
        assert_eq!(cultural.subheading(), "Events in Cultural");
    }

    #[tokio::test]
    async fn test_load_listing_scoped() {
        let router = Router::new()
            .route("/api/category/get", get(|| async { Json(categories_json()) }))
            .route(
                "/api/events/c1",
                get(|| async { Json(json!({ "data": [{ "_id": "e1", "category": "c1" }] })) }),
            );
        let api = api_for(router).await;

        let listing = load_listing(&api, Route::Category("c1".into())).await.unwrap();
        assert_eq!(listing.events.len(), 1);
        assert_eq!(
            listing.scoped_category.and_then(|c| c.name),
            Some("Technical".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_data_is_empty() {
        let router = Router::new()
            .route("/api/category/get", get(|| async { Json(json!({})) }))
            .route("/api/events", get(|| async { Json(json!({ "data": null })) }));
        let api = api_for(router).await;

        let listing = load_listing(&api, Route::All).await.unwrap();
        assert!(listing.events.is_empty());
        assert!(listing.categories.is_empty());
        assert_eq!(listing.filter_options.len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_fails_the_load() {
        let router = Router::new()
            .route("/api/category/get", get(|| async { Json(categories_json()) }))
            .route(
                "/api/events",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            );
        let api = Arc::new(api_for(router).await);

        let (tx, mut rx) = mpsc::channel(4);
        spawn(
            api,
            LoadRequest::Listing {
                generation: 7,
                route: Route::All,
            },
            tx,
        )
        .await
        .unwrap();

        match rx.recv().await {
            Some(Loaded::Listing { generation, result }) => {
                assert_eq!(generation, 7);
                assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
            }
            other => panic!("unexpected load result: {:?}", other),
        }
    }
}
