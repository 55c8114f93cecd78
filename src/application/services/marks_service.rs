//! Staff-facing score imports and corrections.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::{CourseScore, ScorePatch, ScoreType, ScoreUpsert};
use crate::domain::repositories::{CourseRepository, ScoreRepository, StudentRepository};
use crate::error::AppError;
use serde_json::json;

/// One row of a bulk marks import, addressed by enrollment number and
/// course code rather than internal ids.
#[derive(Debug, Clone)]
pub struct MarkRow {
    pub enrollment_number: String,
    pub course_code: String,
    pub score_type: ScoreType,
    pub marks_obtained: f64,
    pub total_obtained: Option<f64>,
    pub date_of_exam: DateTime<Utc>,
}

/// A row the import could not place, with the reason it was skipped.
#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub enrollment_number: String,
    pub course_code: String,
    pub reason: String,
}

/// Result of a bulk import: how many rows landed and which were skipped.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Service for score-record writes. Reads stay on the leaderboard and
/// student services; this one only mutates.
pub struct MarksService {
    students: Arc<dyn StudentRepository>,
    courses: Arc<dyn CourseRepository>,
    scores: Arc<dyn ScoreRepository>,
}

impl MarksService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        courses: Arc<dyn CourseRepository>,
        scores: Arc<dyn ScoreRepository>,
    ) -> Self {
        Self {
            students,
            courses,
            scores,
        }
    }

    /// Imports a batch of marks. Each row upserts on its
    /// `(student, course, score type)` key, so re-importing the same sheet
    /// replaces marks instead of stacking them.
    ///
    /// Rows naming an unknown student or a course the student is not
    /// enrolled in are skipped and reported, not fatal.
    pub async fn import(&self, rows: Vec<MarkRow>) -> Result<ImportOutcome, AppError> {
        let mut imported = 0;
        let mut skipped = Vec::new();

        for row in rows {
            let Some(student_id) = self
                .students
                .find_id_by_enrollment(&row.enrollment_number)
                .await?
            else {
                skipped.push(SkippedRow {
                    enrollment_number: row.enrollment_number,
                    course_code: row.course_code,
                    reason: "unknown enrollment number".to_string(),
                });
                continue;
            };

            let Some(course) = self
                .courses
                .find_enrolled_by_code(student_id, &row.course_code)
                .await?
            else {
                skipped.push(SkippedRow {
                    enrollment_number: row.enrollment_number,
                    course_code: row.course_code,
                    reason: "student not enrolled in course".to_string(),
                });
                continue;
            };

            self.scores
                .upsert(ScoreUpsert {
                    student_id,
                    course_id: course.id,
                    score_type: row.score_type,
                    marks_obtained: row.marks_obtained,
                    total_obtained: row.total_obtained.unwrap_or(100.0),
                    date_of_exam: row.date_of_exam,
                })
                .await?;
            imported += 1;
        }

        tracing::info!(imported, skipped = skipped.len(), "marks import finished");

        Ok(ImportOutcome { imported, skipped })
    }

    /// Applies a partial correction to an existing score record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches the id.
    pub async fn edit(&self, id: i64, patch: ScorePatch) -> Result<CourseScore, AppError> {
        self.scores
            .update(id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Score record not found", json!({ "id": id })))
    }

    /// Deletes a score record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches the id.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.scores.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Score record not found",
                json!({ "id": id }),
            ))
        }
    }
}
