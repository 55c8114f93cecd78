//! Repository trait for bearer sessions.

use crate::domain::entities::{Role, Session};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for session storage and validation.
///
/// Sessions store only the HMAC-SHA256 hash of a bearer token; raw tokens
/// are never persisted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Records a new session for a principal.
    async fn create(
        &self,
        token_hash: &str,
        role: Role,
        principal_id: i64,
    ) -> Result<Session, AppError>;

    /// Looks up a non-revoked session by token hash.
    async fn find_active(&self, token_hash: &str) -> Result<Option<Session>, AppError>;

    /// Updates the `last_used_at` timestamp for monitoring.
    async fn touch(&self, token_hash: &str) -> Result<(), AppError>;

    /// Lists all sessions, newest first. Used by the admin CLI.
    async fn list(&self) -> Result<Vec<Session>, AppError>;

    /// Revokes a session by id.
    async fn revoke(&self, id: i64) -> Result<(), AppError>;

    /// Counts non-revoked sessions. Doubles as the health-check probe.
    async fn count_active(&self) -> Result<i64, AppError>;
}
