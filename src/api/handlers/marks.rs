//! Handlers for staff score writes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::marks::{ImportRequest, ImportResponse, PatchScoreRequest, ScoreRecordResponse};
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;

/// Bulk-imports marks. Each row upserts on its `(student, course, score
/// type)` key; rows that cannot be placed are reported back, not fatal.
///
/// # Endpoint
///
/// `POST /marks/import`
pub async fn import_marks_handler(
    State(state): State<AppState>,
    Json(body): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::bad_request("Invalid import payload", json!(e)))?;

    let rows = body.rows.into_iter().map(Into::into).collect();
    let outcome = state.marks_service.import(rows).await?;

    Ok(Json(outcome.into()))
}

/// Applies a partial correction to one score record.
///
/// # Endpoint
///
/// `PATCH /marks/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no record matches the id.
pub async fn patch_mark_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<PatchScoreRequest>,
) -> Result<Json<ScoreRecordResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::bad_request("Invalid patch payload", json!(e)))?;

    let updated = state.marks_service.edit(id, body.into()).await?;

    Ok(Json(updated.into()))
}

/// Deletes one score record.
///
/// # Endpoint
///
/// `DELETE /marks/{id}`
pub async fn delete_mark_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.marks_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
