//! Axum route handlers for the Ranking API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::session::RankedCvRow;
use crate::ranking::analyzer::{analyze_resumes, rank, AnalyzedCv, CvInput};
use crate::ranking::store::{
    delete_session, get_session, insert_session, list_sessions, SessionSummary,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub job_description: String,
    pub cvs: Vec<CvInput>,
    pub required_keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionDetailResponse {
    pub session_id: Uuid,
    pub job_description: String,
    pub required_keywords: Vec<String>,
    pub cvs: Vec<RankedCvRow>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub job_description: String,
    pub required_keywords: Vec<String>,
    pub cvs: Vec<AnalyzedCv>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rankings
///
/// The core flow: score every CV against the job description (one LLM call
/// each), sort by final score descending, persist the session, and return
/// the ranked list. Nothing is persisted if any scoring call fails.
pub async fn handle_rank(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<RankRequest>,
) -> Result<Json<SessionDetailResponse>, AppError> {
    if request.job_description.trim().is_empty()
        || request.cvs.is_empty()
        || request.required_keywords.is_empty()
    {
        return Err(AppError::Validation(
            "Job description, CVs, and keywords are required".to_string(),
        ));
    }

    let mut analyzed = analyze_resumes(
        state.scorer.as_ref(),
        &request.job_description,
        &request.required_keywords,
        &request.cvs,
    )
    .await?;

    rank(&mut analyzed);

    let session = insert_session(
        &state.db,
        user_id,
        &request.job_description,
        &request.required_keywords,
        &analyzed,
    )
    .await?;

    let (session, cvs) = get_session(&state.db, user_id, session.id).await?;

    Ok(Json(SessionDetailResponse {
        session_id: session.id,
        job_description: session.job_description,
        required_keywords: session.required_keywords,
        cvs,
        created_at: session.created_at,
    }))
}

/// POST /api/v1/rankings/save
///
/// Persists already-analyzed CVs verbatim (e.g. re-saving an edited session).
/// No LLM calls; rank order is the submitted order.
pub async fn handle_save(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<SaveRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    if request.job_description.trim().is_empty()
        || request.required_keywords.is_empty()
        || request.cvs.is_empty()
    {
        return Err(AppError::Validation(
            "Missing required fields".to_string(),
        ));
    }

    let session = insert_session(
        &state.db,
        user_id,
        &request.job_description,
        &request.required_keywords,
        &request.cvs,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Result saved successfully",
            "session_id": session.id
        })),
    ))
}

/// GET /api/v1/rankings
///
/// The caller's session history, newest first, with top candidate per session.
pub async fn handle_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<SessionSummary>>, AppError> {
    let summaries = list_sessions(&state.db, user_id).await?;
    Ok(Json(summaries))
}

/// GET /api/v1/rankings/:id
pub async fn handle_get(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionDetailResponse>, AppError> {
    let (session, cvs) = get_session(&state.db, user_id, session_id).await?;

    Ok(Json(SessionDetailResponse {
        session_id: session.id,
        job_description: session.job_description,
        required_keywords: session.required_keywords,
        cvs,
        created_at: session.created_at,
    }))
}

/// DELETE /api/v1/rankings/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    delete_session(&state.db, user_id, session_id).await?;

    Ok(Json(json!({
        "message": "Session deleted",
        "id": session_id
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_request_deserialization() {
        let json = json!({
            "job_description": "Senior Rust engineer for a payments platform.",
            "required_keywords": ["Rust", "PostgreSQL"],
            "cvs": [
                {"name": "jane.pdf", "content": "Ten years of Rust and Postgres."},
                {"name": "bob.pdf", "content": "Java developer.", "job_id": null}
            ]
        });
        let request: RankRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.cvs.len(), 2);
        assert_eq!(request.required_keywords, vec!["Rust", "PostgreSQL"]);
    }

    #[test]
    fn test_save_request_accepts_analyzed_cvs() {
        let json = json!({
            "job_description": "Backend role",
            "required_keywords": ["Rust"],
            "cvs": [{
                "cv_name": "jane.pdf",
                "cv_text": "Ten years of Rust.",
                "semantic_score": 85.0,
                "keyword_score": 100.0,
                "final_score": 91.0,
                "reason": "Excellent match",
                "matched_keywords": ["Rust"],
                "missing_keywords": []
            }]
        });
        let request: SaveRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.cvs[0].cv_name, "jane.pdf");
        assert!((request.cvs[0].final_score - 91.0).abs() < f64::EPSILON);
    }
}
