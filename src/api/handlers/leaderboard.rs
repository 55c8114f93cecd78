//! Handlers for the batch and department leaderboards.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::api::dto::leaderboard::{
    BatchLeaderboardResponse, DepartmentLeaderboardResponse, LeaderboardQuery,
};
use crate::application::services::LeaderboardFilters;
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

impl From<LeaderboardQuery> for LeaderboardFilters {
    fn from(q: LeaderboardQuery) -> Self {
        LeaderboardFilters {
            course_code: q.course_code,
            score_type: q.score_type,
            semester: q.semester,
        }
    }
}

/// Ranks the caller's batch peers within their center.
///
/// # Endpoint
///
/// `GET /student/get-batch-leaderboard`
///
/// # Query Parameters
///
/// - `course_code` (optional): restrict totals to one course; requires `semester`
/// - `score_type` (optional): restrict totals to one assessment kind
/// - `semester` (optional): restrict peers to students at or beyond this semester
///
/// # Errors
///
/// Returns 400 Bad Request when `course_code` is given without `semester`
/// and 404 Not Found when the course cannot be resolved in the caller's
/// batch and semester.
pub async fn batch_leaderboard_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<BatchLeaderboardResponse>, AppError> {
    let board = state
        .leaderboard_service
        .batch_leaderboard(principal.id(), query.into())
        .await?;

    Ok(Json(board.into()))
}

/// Ranks all students of the caller's department across every center.
///
/// # Endpoint
///
/// `GET /student/get-department-leaderboard`
///
/// Accepts the same query parameters as the batch leaderboard.
pub async fn department_leaderboard_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<DepartmentLeaderboardResponse>, AppError> {
    let board = state
        .leaderboard_service
        .department_leaderboard(principal.id(), query.into())
        .await?;

    Ok(Json(board.into()))
}
