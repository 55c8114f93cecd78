//! Handler for a student's per-course score history.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::api::dto::graph::{CourseGraphResponse, GraphQuery};
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the caller's own score history for one course and assessment
/// kind, date ascending. Individual records are never summed here.
///
/// # Endpoint
///
/// `GET /student/get-course-graph`
///
/// # Query Parameters
///
/// - `course_code` (required): resolved against the caller's enrollments
/// - `score_type` (required)
/// - `semester` (optional): accepted for symmetry with the leaderboards
///
/// # Errors
///
/// Returns 404 Not Found when the caller is not enrolled in a course with
/// that code.
pub async fn course_graph_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<GraphQuery>,
) -> Result<Json<CourseGraphResponse>, AppError> {
    let graph = state
        .leaderboard_service
        .course_graph(principal.id(), &query.course_code, query.score_type)
        .await?;

    Ok(Json(graph.into()))
}
