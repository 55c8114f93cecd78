//! Handlers for student self-service reads and staff rosters.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::api::dto::student::{
    AcademicDetailsResponse, ProfileResponse, RosterQuery, RosterResponse,
};
use crate::domain::entities::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the caller's own profile.
///
/// # Endpoint
///
/// `GET /student/me`
pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.student_service.profile(principal.id()).await?;

    Ok(Json(profile.into()))
}

/// Returns the caller's enrolled courses and every score on record.
///
/// # Endpoint
///
/// `GET /student/academic-details`
pub async fn academic_details_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<AcademicDetailsResponse>, AppError> {
    let details = state
        .student_service
        .academic_details(principal.id())
        .await?;

    Ok(Json(details.into()))
}

/// Lists the students of a center.
///
/// # Endpoint
///
/// `GET /admin/students?center={id}`
///
/// Center admins are pinned to their own center; super admins must name one.
pub async fn roster_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<RosterResponse>, AppError> {
    let roster = state
        .student_service
        .roster_for(&principal, query.center)
        .await?;

    Ok(Json(roster.into()))
}
