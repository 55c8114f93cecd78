//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, dependency wiring and the Axum server
//! lifecycle.

use crate::application::services::{AuthService, LeaderboardService, MarksService, StudentService};
use crate::config::Config;
use crate::infrastructure::persistence::{
    PgCourseRepository, PgPrincipalRepository, PgScoreRepository, PgSessionRepository,
    PgStudentRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Schema migrations
/// - Repositories and services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration, bind or serve
/// step fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    let students = Arc::new(PgStudentRepository::new(pool.clone()));
    let courses = Arc::new(PgCourseRepository::new(pool.clone()));
    let scores = Arc::new(PgScoreRepository::new(pool.clone()));
    let principals = Arc::new(PgPrincipalRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool.clone()));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            principals,
            sessions.clone(),
            config.token_signing_secret.clone(),
        )),
        leaderboard_service: Arc::new(LeaderboardService::new(
            students.clone(),
            courses.clone(),
            scores.clone(),
        )),
        student_service: Arc::new(StudentService::new(
            students.clone(),
            courses.clone(),
            scores.clone(),
        )),
        marks_service: Arc::new(MarksService::new(students, courses, scores)),
        sessions,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
