//! Domain models for the report card service

use chrono::{NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// A single hazard observation submitted by a user
///
/// `uploaded_at` is stored as a UTC `TIMESTAMP` without time zone and
/// serialized as ISO-8601: `2024-06-01T08:30:00`, or with six fractional
/// digits when the sub-second part is non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCard {
    /// Primary key, externally generated
    pub post_id: String,
    pub user_id: Option<String>,
    /// Free-text hazard classification
    pub hazard_type: String,
    /// Free-text severity classification
    pub severity_level: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    /// Reference to externally stored image
    pub image_url: Option<String>,
    /// Reference to externally stored video
    pub video_url: Option<String>,
    pub tags: Option<String>,
    #[serde(serialize_with = "serialize_iso_timestamp")]
    pub uploaded_at: Option<NaiveDateTime>,
}

fn serialize_iso_timestamp<S>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) if ts.nanosecond() != 0 => {
            serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.6f"))
        }
        Some(ts) => serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S")),
        None => serializer.serialize_none(),
    }
}

/// Write-side input for a new report card
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReportCard {
    pub post_id: Option<String>,
    pub user_id: Option<String>,
    pub hazard_type: String,
    pub severity_level: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub tags: Option<String>,
    pub uploaded_at: Option<NaiveDateTime>,
}

impl NewReportCard {
    /// Resolve defaults: a fresh UUID for `post_id` and the current UTC
    /// time for `uploaded_at`.
    pub fn into_report(self) -> ReportCard {
        ReportCard {
            post_id: self.post_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: self.user_id,
            hazard_type: self.hazard_type,
            severity_level: self.severity_level,
            latitude: self.latitude,
            longitude: self.longitude,
            description: self.description,
            image_url: self.image_url,
            video_url: self.video_url,
            tags: self.tags,
            uploaded_at: Some(self.uploaded_at.unwrap_or_else(|| Utc::now().naive_utc())),
        }
    }
}
