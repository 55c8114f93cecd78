//! Bearer token authentication middleware.
//!
//! Tokens arrive as `Authorization: Bearer <token>`. On success the resolved
//! [`Principal`] is inserted into request extensions, so handlers read the
//! verified identity instead of re-parsing headers.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{domain::entities::Principal, error::AppError, state::AppState};

async fn authenticate(st: &AppState, req: Request) -> Result<(Principal, Request), AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let mut req = Request::from_parts(parts, body);

    let principal = st.auth_service.authenticate(&token).await?;
    req.extensions_mut().insert(principal);

    Ok((principal, req))
}

/// Admits only student principals.
///
/// # Errors
///
/// Returns `401 Unauthorized` for a missing or invalid token and
/// `403 Forbidden` for an authenticated non-student.
pub async fn require_student(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (principal, req) = authenticate(&st, req).await?;

    match principal {
        Principal::Student { .. } => Ok(next.run(req).await),
        other => Err(AppError::forbidden(
            "Student access required",
            serde_json::json!({"role": other.role().as_str()}),
        )),
    }
}

/// Admits only staff principals (admins and super admins).
pub async fn require_staff(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (principal, req) = authenticate(&st, req).await?;

    if principal.is_staff() {
        Ok(next.run(req).await)
    } else {
        Err(AppError::forbidden(
            "Staff access required",
            serde_json::json!({"role": principal.role().as_str()}),
        ))
    }
}
