use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A saved job description, reusable across ranking sessions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: Option<String>,
    pub job_description: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}
