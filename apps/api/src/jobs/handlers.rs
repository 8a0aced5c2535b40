//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub job_title: Option<String>,
    pub job_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let job: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs (user_id, job_title, job_description, keywords)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&request.job_title)
    .bind(&request.job_description)
    .bind(&request.keywords)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs: Vec<JobRow> =
        sqlx::query_as("SELECT * FROM jobs WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1 AND user_id = $2")
        .bind(job_id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?;

    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(job))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND user_id = $2")
        .bind(job_id)
        .bind(user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    Ok(Json(json!({
        "message": "Job deleted",
        "id": job_id
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_job_request_keywords_default_empty() {
        let json = json!({
            "job_title": "Backend Engineer",
            "job_description": "Build services in Rust."
        });
        let request: CreateJobRequest = serde_json::from_value(json).unwrap();
        assert!(request.keywords.is_empty());
        assert_eq!(request.job_title.as_deref(), Some("Backend Engineer"));
    }

    #[test]
    fn test_create_job_request_title_is_optional() {
        let json = json!({
            "job_description": "Build services in Rust.",
            "keywords": ["Rust"]
        });
        let request: CreateJobRequest = serde_json::from_value(json).unwrap();
        assert!(request.job_title.is_none());
    }
}
