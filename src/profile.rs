//! Signed-in user's profile and partial updates

use crate::api::{ApiClient, ApiError};
use crate::model::text;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NO_CHANGES: &str = "No changes to save";
pub const SAVED: &str = "Profile updated successfully!";

/// User record as returned by `/v1/auth/me` and cached in the session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub mobile_no: Option<String>,
    #[serde(
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub college: Option<String>,
    #[serde(
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<String>,
    #[serde(
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub course: Option<String>,
    #[serde(
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<String>,
    /// Fields this client does not edit (role, ids, timestamps) survive a round trip
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Merge an accepted update into the cached record
    pub fn apply(&mut self, update: &ProfileUpdate) {
        let pairs = [
            (&mut self.name, &update.name),
            (&mut self.mobile_no, &update.mobile_no),
            (&mut self.gender, &update.gender),
            (&mut self.city, &update.city),
            (&mut self.college, &update.college),
            (&mut self.course, &update.course),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                *field = Some(value.clone());
            }
        }
    }

    /// `(label, value)` rows for display; missing values are blank
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Name", self.name.as_deref().unwrap_or("")),
            ("Email", self.email.as_deref().unwrap_or("")),
            ("Mobile", self.mobile_no.as_deref().unwrap_or("")),
            ("College", self.college.as_deref().unwrap_or("")),
            ("City", self.city.as_deref().unwrap_or("")),
            ("Course", self.course.as_deref().unwrap_or("")),
            ("Gender", self.gender.as_deref().unwrap_or("")),
        ]
    }
}

/// Editable fields as the user typed them; empty means "leave alone"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub mobile_no: String,
    pub gender: String,
    pub city: String,
    pub college: String,
    pub course: String,
}

impl ProfileForm {
    /// Prefill from the cached record
    pub fn from_record(record: &UserRecord) -> Self {
        let value = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: value(&record.name),
            mobile_no: value(&record.mobile_no),
            gender: value(&record.gender),
            city: value(&record.city),
            college: value(&record.college),
            course: value(&record.course),
        }
    }

    /// Fields that are non-empty and differ from `record`
    ///
    /// Only editable fields can appear; email and unknown fields never do.
    pub fn diff(&self, record: &UserRecord) -> ProfileUpdate {
        fn changed(value: &str, current: &Option<String>) -> Option<String> {
            if value.is_empty() || current.as_deref() == Some(value) {
                None
            } else {
                Some(value.to_string())
            }
        }

        ProfileUpdate {
            name: changed(&self.name, &record.name),
            mobile_no: changed(&self.mobile_no, &record.mobile_no),
            gender: changed(&self.gender, &record.gender),
            city: changed(&self.city, &record.city),
            college: changed(&self.college, &record.college),
            course: changed(&self.course, &record.course),
        }
    }
}

/// PATCH body: only the fields that changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

impl ProfileUpdate {
    /// Number of fields carried
    pub fn len(&self) -> usize {
        [
            &self.name,
            &self.mobile_no,
            &self.gender,
            &self.city,
            &self.college,
            &self.course,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing differed; no request was sent
    NoChanges,
    /// Server accepted the update and `record` now reflects it
    Saved,
}

impl SaveOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::NoChanges => NO_CHANGES,
            SaveOutcome::Saved => SAVED,
        }
    }
}

/// Submit the changed fields of `form` and merge them into `record` on success
pub async fn save_profile(
    api: &ApiClient,
    token: &str,
    record: &mut UserRecord,
    form: &ProfileForm,
) -> Result<SaveOutcome, ApiError> {
    let update = form.diff(record);
    if update.is_empty() {
        tracing::debug!("Profile form has no changes");
        return Ok(SaveOutcome::NoChanges);
    }

    api.update_profile(token, &update).await?;
    record.apply(&update);
    Ok(SaveOutcome::Saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use axum::routing::patch;
    use axum::{Json, Router};
    use serde_json::json;
    use std::time::Duration;

    fn record() -> UserRecord {
        serde_json::from_value(json!({
            "name": "Asha",
            "email": "asha@example.com",
            "city": "Pune",
            "role": "student"
        }))
        .unwrap()
    }

    #[test]
    fn test_diff_skips_empty_and_unchanged() {
        let record = record();
        let mut form = ProfileForm::from_record(&record);
        assert!(form.diff(&record).is_empty());

        form.city = "Mumbai".into();
        form.course = "B.Tech".into();
        form.name = String::new();

        let update = form.diff(&record);
        assert_eq!(update.len(), 2);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "city": "Mumbai", "course": "B.Tech" })
        );
    }

    #[test]
    fn test_apply_keeps_extra_fields() {
        let mut record = record();
        record.apply(&ProfileUpdate {
            gender: Some("female".into()),
            ..Default::default()
        });

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["gender"], "female");
        assert_eq!(value["role"], "student");
        assert_eq!(value["email"], "asha@example.com");
    }

    #[test]
    fn test_numeric_fields_decode_as_text() {
        let record: UserRecord = serde_json::from_value(json!({
            "name": "Ravi",
            "mobile_no": 9876543210u64,
            "city": null,
            "course": { "code": 7 }
        }))
        .unwrap();

        assert_eq!(record.mobile_no.as_deref(), Some("9876543210"));
        assert_eq!(record.city, None);
        assert_eq!(record.course, None);
        assert_eq!(ProfileForm::from_record(&record).mobile_no, "9876543210");
    }

    #[tokio::test]
    async fn test_save_without_changes_sends_nothing() {
        // Unroutable base: any request would fail
        let api = ApiClient::new("http://127.0.0.1:9/api", Duration::from_millis(200)).unwrap();
        let mut record = record();
        let form = ProfileForm::from_record(&record);

        let outcome = save_profile(&api, "tok", &mut record, &form).await.unwrap();
        assert_eq!(outcome, SaveOutcome::NoChanges);
        assert_eq!(outcome.message(), "No changes to save");
    }

    #[tokio::test]
    async fn test_save_merges_on_success() {
        let router = Router::new().route(
            "/api/v1/auth/me",
            patch(|| async { Json(json!({ "success": true, "message": "ok" })) }),
        );
        let base = test_server::spawn(router).await;
        let api = ApiClient::new(&base, Duration::from_secs(5)).unwrap();

        let mut record = record();
        let mut form = ProfileForm::from_record(&record);
        form.college = "COEP".into();

        let outcome = save_profile(&api, "tok", &mut record, &form).await.unwrap();
        assert_eq!(outcome.message(), "Profile updated successfully!");
        assert_eq!(record.college.as_deref(), Some("COEP"));
    }
}
