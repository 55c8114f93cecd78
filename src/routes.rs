//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`     - Health check (public)
//! - `/auth/*`          - Login (public, rate limited)
//! - `/student/*`       - Student self-service (student bearer token)
//! - `/admin/*`         - Staff rosters (staff bearer token)
//! - `/marks/*`         - Staff score writes (staff bearer token)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer token resolved to a tagged principal
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let auth_router = api::routes::auth_routes().layer(rate_limit::layer());

    let student_router = api::routes::student_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_student,
        ))
        .layer(rate_limit::secure_layer());

    let staff_layer = middleware::from_fn_with_state(state.clone(), auth::require_staff);

    let admin_router = api::routes::admin_routes()
        .route_layer(staff_layer.clone())
        .layer(rate_limit::secure_layer());

    let marks_router = api::routes::marks_routes()
        .route_layer(staff_layer)
        .layer(rate_limit::secure_layer());

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/auth", auth_router)
        .nest("/student", student_router)
        .nest("/admin", admin_router)
        .nest("/marks", marks_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
