//! Handler for login.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;

/// Verifies credentials and opens a bearer session.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body and 401 Unauthorized for
/// unknown or wrong credentials.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::bad_request("Invalid login request", json!(e)))?;

    let token = state
        .auth_service
        .login(body.role, &body.email, &body.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        role: body.role,
    }))
}
