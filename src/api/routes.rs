//! Route groups for the HTTP surface.

use crate::api::handlers::{
    auth::login_handler,
    graph::course_graph_handler,
    leaderboard::{batch_leaderboard_handler, department_leaderboard_handler},
    marks::{delete_mark_handler, import_marks_handler, patch_mark_handler},
    students::{academic_details_handler, profile_handler, roster_handler},
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Public authentication routes.
///
/// # Endpoints
///
/// - `POST /login` - Verify credentials and open a bearer session
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login_handler))
}

/// Student self-service routes, protected by the student middleware.
///
/// # Endpoints
///
/// - `GET /me`                         - Own profile
/// - `GET /academic-details`           - Enrolled courses and all scores
/// - `GET /get-batch-leaderboard`      - Ranked batch peers within own center
/// - `GET /get-department-leaderboard` - Ranked department peers across centers
/// - `GET /get-course-graph`           - Own score history for one course
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(profile_handler))
        .route("/academic-details", get(academic_details_handler))
        .route("/get-batch-leaderboard", get(batch_leaderboard_handler))
        .route(
            "/get-department-leaderboard",
            get(department_leaderboard_handler),
        )
        .route("/get-course-graph", get(course_graph_handler))
}

/// Staff roster routes, protected by the staff middleware.
///
/// # Endpoints
///
/// - `GET /students` - List students of a center
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/students", get(roster_handler))
}

/// Staff score-write routes, protected by the staff middleware.
///
/// # Endpoints
///
/// - `POST   /import`  - Bulk-import marks (upsert per row)
/// - `PATCH  /{id}`    - Correct one score record
/// - `DELETE /{id}`    - Remove one score record
pub fn marks_routes() -> Router<AppState> {
    Router::new()
        .route("/import", post(import_marks_handler))
        .route("/{id}", patch(patch_mark_handler).delete(delete_mark_handler))
}
