//! Repository trait for student lookup and rosters.

use crate::domain::entities::{StudentContext, StudentSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for student reads.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStudentRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Resolves a student together with its center, department and batch.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(StudentContext))` if the student exists
    /// - `Ok(None)` if no student matches the id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_context(&self, id: i64) -> Result<Option<StudentContext>, AppError>;

    /// Looks up a student id by enrollment number. Used by bulk mark import.
    async fn find_id_by_enrollment(
        &self,
        enrollment_number: &str,
    ) -> Result<Option<i64>, AppError>;

    /// Lists all students belonging to a center.
    async fn list_by_center(&self, center_id: i64) -> Result<Vec<StudentSummary>, AppError>;

    /// Counts students belonging to a center.
    async fn count_by_center(&self, center_id: i64) -> Result<i64, AppError>;

    /// Counts a student's current course enrollments.
    async fn course_count(&self, student_id: i64) -> Result<i64, AppError>;
}
