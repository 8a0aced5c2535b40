#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// SHA-256 hex digest of the user's API token. The token itself is never stored.
    #[serde(skip_serializing)]
    pub api_token_hash: String,
    pub created_at: DateTime<Utc>,
}
