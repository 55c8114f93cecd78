//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LeaderboardService, MarksService, StudentService};
use crate::domain::repositories::SessionRepository;

/// Service handles shared across the router. Repositories are injected into
/// the services at startup; handlers never touch the database directly.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub leaderboard_service: Arc<LeaderboardService>,
    pub student_service: Arc<StudentService>,
    pub marks_service: Arc<MarksService>,
    /// Kept directly for the health probe and admin tooling.
    pub sessions: Arc<dyn SessionRepository>,
}
