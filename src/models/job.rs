use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

pub const COPY_SUFFIX: &str = " (Copy)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Draft,
    Posted,
    Closed,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub posting_id: Option<i64>,
    pub title: String,
    pub status: JobStatus,
    pub company: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: Option<String>,
    pub metadata: JsonValue,
    pub applications_count: i32,
    pub notification_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Draft copy of this job: everything descriptive is kept, lifecycle fields start over.
    pub fn draft_copy(&self, id: Uuid, posting_id: Option<i64>, now: DateTime<Utc>) -> Job {
        Job {
            id,
            posting_id,
            title: format!("{}{}", self.title, COPY_SUFFIX),
            status: JobStatus::Draft,
            applications_count: 0,
            notification_sent_at: None,
            created_at: now,
            updated_at: None,
            ..self.clone()
        }
    }
}
