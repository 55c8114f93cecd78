//! Repository trait for course resolution.

use crate::domain::entities::Course;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for course lookups.
///
/// Course codes are only unique per semester offering, so leaderboard
/// filters resolve a code within the reference student's batch and semester.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Resolves the unique course with `code` in semester `semester_no` of
    /// `batch_id`.
    async fn find_in_batch_semester(
        &self,
        batch_id: i64,
        semester_no: i32,
        code: &str,
    ) -> Result<Option<Course>, AppError>;

    /// Resolves a course by code among the student's own enrollments.
    /// Used by the course-graph read.
    async fn find_enrolled_by_code(
        &self,
        student_id: i64,
        code: &str,
    ) -> Result<Option<Course>, AppError>;

    /// Lists a student's enrolled courses.
    async fn list_for_student(&self, student_id: i64) -> Result<Vec<Course>, AppError>;
}
