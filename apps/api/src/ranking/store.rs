//! Persistence for ranking sessions. All reads are scoped by `user_id`;
//! a session owned by another user is indistinguishable from a missing one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::session::{RankedCvRow, SessionRow};
use crate::ranking::analyzer::AnalyzedCv;

/// The best-scoring candidate of a session, shown in list summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopCandidate {
    pub name: String,
    pub final_score: f64,
}

/// One row of the session list: enough to render a history view without
/// loading the full CV batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub job_description: String,
    pub required_keywords: Vec<String>,
    pub candidate_count: i64,
    pub top_candidate: Option<TopCandidate>,
}

/// Inserts a session and its ranked CVs in one transaction.
/// `analyzed` must already be in rank order; ranks are assigned 1-based.
pub async fn insert_session(
    pool: &PgPool,
    user_id: Uuid,
    job_description: &str,
    required_keywords: &[String],
    analyzed: &[AnalyzedCv],
) -> Result<SessionRow, AppError> {
    let mut tx = pool.begin().await?;

    let session: SessionRow = sqlx::query_as(
        r#"
        INSERT INTO ranking_sessions (user_id, job_description, required_keywords)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(job_description)
    .bind(required_keywords)
    .fetch_one(&mut *tx)
    .await?;

    for (i, cv) in analyzed.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO ranked_cvs
                (session_id, rank, cv_name, cv_text, semantic_score, keyword_score,
                 final_score, reason, matched_keywords, missing_keywords, job_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(session.id)
        .bind(i as i32 + 1)
        .bind(&cv.cv_name)
        .bind(&cv.cv_text)
        .bind(cv.semantic_score)
        .bind(cv.keyword_score)
        .bind(cv.final_score)
        .bind(&cv.reason)
        .bind(&cv.matched_keywords)
        .bind(&cv.missing_keywords)
        .bind(cv.job_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        "Persisted ranking session {} with {} CVs for user {}",
        session.id,
        analyzed.len(),
        user_id
    );

    Ok(session)
}

/// Returns the caller's sessions, newest first, as summaries.
pub async fn list_sessions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<SessionSummary>, AppError> {
    let sessions: Vec<SessionRow> = sqlx::query_as(
        "SELECT * FROM ranking_sessions WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    if sessions.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<Uuid> = sessions.iter().map(|s| s.id).collect();

    let counts: Vec<(Uuid, i64)> = sqlx::query_as(
        "SELECT session_id, COUNT(*) FROM ranked_cvs WHERE session_id = ANY($1) GROUP BY session_id",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;
    let counts: HashMap<Uuid, i64> = counts.into_iter().collect();

    // rank 1 is the top candidate
    let tops: Vec<(Uuid, String, f64)> = sqlx::query_as(
        r#"
        SELECT DISTINCT ON (session_id) session_id, cv_name, final_score
        FROM ranked_cvs
        WHERE session_id = ANY($1)
        ORDER BY session_id, rank ASC
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;
    let tops: HashMap<Uuid, (String, f64)> = tops
        .into_iter()
        .map(|(id, name, score)| (id, (name, score)))
        .collect();

    Ok(sessions
        .into_iter()
        .map(|s| {
            let top_candidate = tops.get(&s.id).map(|(name, final_score)| TopCandidate {
                name: name.clone(),
                final_score: *final_score,
            });
            SessionSummary {
                candidate_count: counts.get(&s.id).copied().unwrap_or(0),
                top_candidate,
                id: s.id,
                created_at: s.created_at,
                job_description: s.job_description,
                required_keywords: s.required_keywords,
            }
        })
        .collect())
}

/// Loads one session and its CVs in rank order, with ownership check.
pub async fn get_session(
    pool: &PgPool,
    user_id: Uuid,
    session_id: Uuid,
) -> Result<(SessionRow, Vec<RankedCvRow>), AppError> {
    let session: Option<SessionRow> =
        sqlx::query_as("SELECT * FROM ranking_sessions WHERE id = $1 AND user_id = $2")
            .bind(session_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    let session =
        session.ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let cvs: Vec<RankedCvRow> =
        sqlx::query_as("SELECT * FROM ranked_cvs WHERE session_id = $1 ORDER BY rank ASC")
            .bind(session_id)
            .fetch_all(pool)
            .await?;

    Ok((session, cvs))
}

/// Deletes a session (CVs cascade), with ownership check.
pub async fn delete_session(
    pool: &PgPool,
    user_id: Uuid,
    session_id: Uuid,
) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM ranking_sessions WHERE id = $1 AND user_id = $2")
        .bind(session_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Session {session_id} not found"
        )));
    }

    info!("Deleted ranking session {session_id} for user {user_id}");
    Ok(())
}
