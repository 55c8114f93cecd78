//! Staff marks-import and correction bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{ImportOutcome, MarkRow, SkippedRow};
use crate::domain::entities::{ScorePatch, ScoreType};

/// One row of a bulk import.
///
/// `Serialize` is required by the `nested` list validation on
/// [`ImportRequest`], which echoes offending rows into the error params.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct MarkRowDto {
    #[validate(length(min = 1, message = "enrollment_number must not be empty"))]
    pub enrollment_number: String,

    #[validate(length(min = 1, message = "course_code must not be empty"))]
    pub course_code: String,

    pub score_type: ScoreType,

    #[validate(range(min = 0.0, message = "marks_obtained must not be negative"))]
    pub marks_obtained: f64,

    #[validate(range(min = 0.0, message = "total_obtained must not be negative"))]
    pub total_obtained: Option<f64>,

    pub date_of_exam: DateTime<Utc>,
}

impl From<MarkRowDto> for MarkRow {
    fn from(dto: MarkRowDto) -> Self {
        MarkRow {
            enrollment_number: dto.enrollment_number,
            course_code: dto.course_code,
            score_type: dto.score_type,
            marks_obtained: dto.marks_obtained,
            total_obtained: dto.total_obtained,
            date_of_exam: dto.date_of_exam,
        }
    }
}

/// Body for `POST /marks/import`.
#[derive(Debug, Deserialize, Validate)]
pub struct ImportRequest {
    #[validate(length(min = 1, message = "rows must not be empty"), nested)]
    pub rows: Vec<MarkRowDto>,
}

/// A skipped row with the reason it could not be placed.
#[derive(Debug, Serialize)]
pub struct SkippedRowDto {
    pub enrollment_number: String,
    pub course_code: String,
    pub reason: String,
}

impl From<SkippedRow> for SkippedRowDto {
    fn from(row: SkippedRow) -> Self {
        SkippedRowDto {
            enrollment_number: row.enrollment_number,
            course_code: row.course_code,
            reason: row.reason,
        }
    }
}

/// Response for `POST /marks/import`.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub skipped: Vec<SkippedRowDto>,
}

impl From<ImportOutcome> for ImportResponse {
    fn from(outcome: ImportOutcome) -> Self {
        ImportResponse {
            imported: outcome.imported,
            skipped: outcome.skipped.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body for `PATCH /marks/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchScoreRequest {
    pub score_type: Option<ScoreType>,

    #[validate(range(min = 0.0, message = "marks_obtained must not be negative"))]
    pub marks_obtained: Option<f64>,

    #[validate(range(min = 0.0, message = "total_obtained must not be negative"))]
    pub total_obtained: Option<f64>,

    pub date_of_exam: Option<DateTime<Utc>>,
}

impl From<PatchScoreRequest> for ScorePatch {
    fn from(req: PatchScoreRequest) -> Self {
        ScorePatch {
            score_type: req.score_type,
            marks_obtained: req.marks_obtained,
            total_obtained: req.total_obtained,
            date_of_exam: req.date_of_exam,
        }
    }
}

/// A stored score record echoed back after a write.
#[derive(Debug, Serialize)]
pub struct ScoreRecordResponse {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub score_type: ScoreType,
    pub marks_obtained: f64,
    pub total_obtained: f64,
    pub date_of_exam: DateTime<Utc>,
    pub graded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::domain::entities::CourseScore> for ScoreRecordResponse {
    fn from(score: crate::domain::entities::CourseScore) -> Self {
        ScoreRecordResponse {
            id: score.id,
            student_id: score.student_id,
            course_id: score.course_id,
            score_type: score.score_type,
            marks_obtained: score.marks_obtained,
            total_obtained: score.total_obtained,
            date_of_exam: score.date_of_exam,
            graded_at: score.graded_at,
            updated_at: score.updated_at,
        }
    }
}
