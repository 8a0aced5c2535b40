//! Axum route handlers for session exports.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::export::csv::render_session_csv;
use crate::export::pdf::render_session_pdf;
use crate::ranking::store::get_session;
use crate::state::AppState;

/// GET /api/v1/rankings/:id/export/csv
pub async fn handle_export_csv(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (_, cvs) = get_session(&state.db, user_id, session_id).await?;
    let bytes = render_session_csv(&cvs)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"ranking_{session_id}.csv\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// GET /api/v1/rankings/:id/export/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (session, cvs) = get_session(&state.db, user_id, session_id).await?;
    let bytes = render_session_pdf(&session, &cvs)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"ranking_{session_id}.pdf\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
