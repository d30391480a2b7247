//! HTTP client for the festival REST API
//!
//! Endpoints:
//! - `GET  /category/get`        category catalog
//! - `GET  /events`              every event
//! - `GET  /events/{categoryId}` events of one category
//! - `GET  /v1/auth/me`          signed-in user (bearer)
//! - `PATCH /v1/auth/me`         partial profile update (bearer)
//!
//! Collection endpoints wrap their payload as `{ "data": [...] }`.

mod error;

pub use error::ApiError;

use crate::model::{Category, Event, ListEnvelope};
use crate::profile::{ProfileUpdate, UserRecord};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Fallback shown when the server rejects a profile update without a message
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update profile";

/// Body of error responses and of the profile update response
#[derive(Debug, Default, Deserialize)]
struct StatusBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// `GET /v1/auth/me` answers with either `data` or `user`
#[derive(Debug, Deserialize)]
struct MeBody {
    data: Option<UserRecord>,
    user: Option<UserRecord>,
}

/// Festival API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`
    ///
    /// # Errors
    /// Returns an error if the URL does not parse or the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Client(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Client(format!(
                "API URL '{}' cannot be used as a base",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Client(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!("API client ready: {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL by appending path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetch the category catalog
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_collection(&["category", "get"]).await
    }

    /// Fetch every event, or only the events of one category
    pub async fn events(&self, category_id: Option<&str>) -> Result<Vec<Event>, ApiError> {
        match category_id {
            Some(id) => self.get_collection(&["events", id]).await,
            None => self.get_collection(&["events"]).await,
        }
    }

    /// Fetch the signed-in user's record
    pub async fn current_user(&self, token: &str) -> Result<UserRecord, ApiError> {
        let url = self.endpoint(&["v1", "auth", "me"]);
        let response = send(self.client.get(url).bearer_auth(token)).await?;
        let response = ensure_success(response).await?;

        let body: MeBody = response.json().await?;
        body.data
            .or(body.user)
            .ok_or_else(|| ApiError::Decode("response carries no user record".to_string()))
    }

    /// Send a partial profile update
    ///
    /// Only the fields present in `update` are sent. A non-success status or a
    /// `success: false` body becomes [`ApiError::Rejected`] carrying the
    /// server's message, or [`PROFILE_UPDATE_FAILED`] when it gave none.
    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<(), ApiError> {
        let url = self.endpoint(&["v1", "auth", "me"]);
        let response = send(self.client.patch(url).bearer_auth(token).json(update)).await?;

        let status = response.status();
        let text = response.text().await?;
        let body: StatusBody = serde_json::from_str(&text).unwrap_or_default();

        if status.is_success() && body.success.unwrap_or(false) {
            tracing::info!("Profile updated ({} field(s))", update.len());
            return Ok(());
        }

        let message = body
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| PROFILE_UPDATE_FAILED.to_string());
        tracing::warn!("Profile update rejected ({}): {}", status.as_u16(), message);
        Err(ApiError::Rejected { message })
    }

    async fn get_collection<T>(&self, segments: &[&str]) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        tracing::debug!("GET {}", url);

        let response = send(self.client.get(url)).await?;
        let response = ensure_success(response).await?;
        let ListEnvelope(items) = response.json().await?;
        Ok(items)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

/// Turn non-success statuses into `ApiError::Status`, keeping the server's message
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<StatusBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_default();

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
pub(crate) mod test_server {
    //! In-process fake of the festival API

    use axum::Router;
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral port; returns the API base URL
    pub async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api", addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_building() {
        let api = client("http://localhost:7000/api/");
        assert_eq!(
            api.endpoint(&["category", "get"]).as_str(),
            "http://localhost:7000/api/category/get"
        );
        assert_eq!(
            api.endpoint(&["events", "a b/c"]).as_str(),
            "http://localhost:7000/api/events/a%20b%2Fc"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", Duration::from_secs(1)),
            Err(ApiError::Client(_))
        ));
        assert!(matches!(
            ApiClient::new("mailto:fest@example.com", Duration::from_secs(1)),
            Err(ApiError::Client(_))
        ));
    }

    #[tokio::test]
    async fn test_collections_and_missing_data() {
        let router = Router::new()
            .route(
                "/api/category/get",
                get(|| async { Json(json!({ "data": [{ "_id": "c1", "name": "Technical" }] })) }),
            )
            .route("/api/events", get(|| async { Json(json!({ "ok": true })) }))
            .route(
                "/api/events/:id",
                get(|axum::extract::Path(id): axum::extract::Path<String>| async move {
                    Json(json!({ "data": [{ "_id": "e1", "category": id }, null, 3] }))
                }),
            );
        let api = client(&test_server::spawn(router).await);

        let categories = api.categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].label(), Some("Technical"));

        // No `data` field is an empty collection, not an error
        assert!(api.events(None).await.unwrap().is_empty());

        // Unreadable entries are skipped, the rest of the page still loads
        let scoped = api.events(Some("c1")).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].category.as_ref().and_then(|c| c.id()), Some("c1"));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let router = Router::new().route(
            "/api/events",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "database offline" })),
                )
            }),
        );
        let api = client(&test_server::spawn(router).await);

        match api.events(None).await {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "database offline");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_profile_sends_bearer_and_partial_body() {
        let router = Router::new().route(
            "/api/v1/auth/me",
            axum::routing::patch(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if auth != "Bearer tok-123" {
                    return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "bad token" })));
                }
                if body != json!({ "city": "Pune" }) {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "success": false, "message": format!("unexpected {}", body) })),
                    );
                }
                (StatusCode::OK, Json(json!({ "success": true })))
            }),
        );
        let api = client(&test_server::spawn(router).await);

        let update = ProfileUpdate {
            city: Some("Pune".into()),
            ..Default::default()
        };
        api.update_profile("tok-123", &update).await.unwrap();

        match api.update_profile("wrong", &update).await {
            Err(ApiError::Rejected { message }) => assert_eq!(message, "bad token"),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_profile_rejection_without_message() {
        let router = Router::new().route(
            "/api/v1/auth/me",
            axum::routing::patch(|| async { Json(json!({ "success": false })) }),
        );
        let api = client(&test_server::spawn(router).await);

        let update = ProfileUpdate {
            name: Some("Asha".into()),
            ..Default::default()
        };
        match api.update_profile("tok", &update).await {
            Err(ApiError::Rejected { message }) => assert_eq!(message, PROFILE_UPDATE_FAILED),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_current_user() {
        let router = Router::new().route(
            "/api/v1/auth/me",
            get(|| async { Json(json!({ "user": { "name": "Asha", "email": "asha@example.com" } })) }),
        );
        let api = client(&test_server::spawn(router).await);

        let user = api.current_user("tok").await.unwrap();
        assert_eq!(user.name.as_deref(), Some("Asha"));
        assert_eq!(user.email.as_deref(), Some("asha@example.com"));
    }
}
