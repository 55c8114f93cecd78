//! Repository trait for principal credentials and identity resolution.

use crate::domain::entities::{Credentials, Principal, Role};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface over the role-specific people tables.
///
/// Every role resolves through the same two operations, so callers never
/// branch on role strings themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Looks up stored credentials for a role and email.
    async fn find_credentials(
        &self,
        role: Role,
        email: &str,
    ) -> Result<Option<Credentials>, AppError>;

    /// Resolves a live principal for a role and id, or `None` if the
    /// account no longer exists.
    async fn resolve(&self, role: Role, id: i64) -> Result<Option<Principal>, AppError>;

    /// Provisions an admin account. `center_id` is `None` only for
    /// super admins. Used by the admin CLI.
    async fn create_admin(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        center_id: Option<i64>,
    ) -> Result<i64, AppError>;
}
