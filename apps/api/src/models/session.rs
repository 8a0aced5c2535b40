use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One ranking session: a job description scored against a batch of CVs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_description: String,
    pub required_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A single scored CV within a session. `rank` is 1-based, assigned after the
/// final-score sort, so reads never re-sort.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RankedCvRow {
    pub id: Uuid,
    pub session_id: Uuid,
    pub rank: i32,
    pub cv_name: String,
    pub cv_text: String,
    /// 0–100
    pub semantic_score: f64,
    /// 0–100
    pub keyword_score: f64,
    /// 0–100, always 0.6 * semantic + 0.4 * keyword
    pub final_score: f64,
    pub reason: Option<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Optional link back to the saved job the CV batch was uploaded against.
    pub job_id: Option<Uuid>,
}
