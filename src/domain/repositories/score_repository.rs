//! Repository trait for score aggregation and score-record writes.

use crate::domain::entities::{
    CourseScore, DepartmentType, ScorePatch, ScorePoint, ScoreType, ScoreUpsert,
    StudentScoreRecord,
};
use crate::domain::ranking::ScoreEntry;
use crate::error::AppError;
use async_trait::async_trait;

/// Filter criteria for leaderboard total queries.
///
/// `course_id` and `score_type` narrow which score records count toward a
/// student's total; `min_semester` narrows the peer population to students
/// at or beyond that semester (students who advanced past a filtered
/// semester stay on its leaderboard).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreFilter {
    pub course_id: Option<i64>,
    pub score_type: Option<ScoreType>,
    pub min_semester: Option<i32>,
}

impl ScoreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_course(mut self, course_id: Option<i64>) -> Self {
        self.course_id = course_id;
        self
    }

    pub fn with_score_type(mut self, score_type: Option<ScoreType>) -> Self {
        self.score_type = score_type;
        self
    }

    pub fn with_min_semester(mut self, min_semester: Option<i32>) -> Self {
        self.min_semester = min_semester;
        self
    }
}

/// Repository interface for score records.
///
/// The totals queries do the per-student summing in the database (one
/// grouped read per leaderboard request); rank assignment happens in
/// [`crate::domain::ranking`] over the returned entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Per-student score totals over all students sharing `center_id` and
    /// `batch_id`, subject to `filter`. Students without qualifying scores
    /// appear with a total of zero.
    async fn batch_totals(
        &self,
        center_id: i64,
        batch_id: i64,
        filter: &ScoreFilter,
    ) -> Result<Vec<ScoreEntry>, AppError>;

    /// Per-student score totals over all students of `department` across
    /// every center, subject to `filter`.
    async fn department_totals(
        &self,
        department: DepartmentType,
        filter: &ScoreFilter,
    ) -> Result<Vec<ScoreEntry>, AppError>;

    /// One student's date-ordered score history for a course and score type.
    async fn series(
        &self,
        student_id: i64,
        course_id: i64,
        score_type: ScoreType,
    ) -> Result<Vec<ScorePoint>, AppError>;

    /// All of one student's score records joined with their courses.
    async fn list_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<StudentScoreRecord>, AppError>;

    /// Creates or replaces a score on its `(student, course, type)` key.
    async fn upsert(&self, upsert: ScoreUpsert) -> Result<CourseScore, AppError>;

    /// Applies a partial update to a score record.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if no record matches the id.
    async fn update(&self, id: i64, patch: ScorePatch) -> Result<Option<CourseScore>, AppError>;

    /// Deletes a score record. Returns `false` if no record matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
