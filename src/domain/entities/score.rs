//! Graded score records.
//!
//! Scores are keyed by `(student, course, score_type)`: bulk import upserts
//! on that triple, so a student carries at most one record per assessment
//! kind per course and leaderboard sums never double count a repeated test.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of assessment kinds a score record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreType {
    FortnightlyTest,
    Assignment,
    MidSem,
    EndSem,
    Interview,
}

impl ScoreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreType::FortnightlyTest => "FORTNIGHTLY_TEST",
            ScoreType::Assignment => "ASSIGNMENT",
            ScoreType::MidSem => "MID_SEM",
            ScoreType::EndSem => "END_SEM",
            ScoreType::Interview => "INTERVIEW",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown score type: {0}")]
pub struct ParseScoreTypeError(String);

impl std::str::FromStr for ScoreType {
    type Err = ParseScoreTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FORTNIGHTLY_TEST" => Ok(ScoreType::FortnightlyTest),
            "ASSIGNMENT" => Ok(ScoreType::Assignment),
            "MID_SEM" => Ok(ScoreType::MidSem),
            "END_SEM" => Ok(ScoreType::EndSem),
            "INTERVIEW" => Ok(ScoreType::Interview),
            other => Err(ParseScoreTypeError(other.to_string())),
        }
    }
}

impl std::fmt::Display for ScoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A graded record linking one student to one course.
#[derive(Debug, Clone)]
pub struct CourseScore {
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

/// Input for creating-or-replacing a score on its `(student, course, type)` key.
#[derive(Debug, Clone)]
pub struct ScoreUpsert {
    pub student_id: i64,
    pub course_id: i64,
    pub score_type: ScoreType,
    pub marks_obtained: f64,
    pub total_obtained: f64,
    pub date_of_exam: DateTime<Utc>,
}

/// Partial update for an existing score record. `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct ScorePatch {
    pub score_type: Option<ScoreType>,
    pub marks_obtained: Option<f64>,
    pub total_obtained: Option<f64>,
    pub date_of_exam: Option<DateTime<Utc>>,
}

/// One point of a student's score history for the course-graph read.
#[derive(Debug, Clone)]
pub struct ScorePoint {
    pub marks_obtained: f64,
    pub total_obtained: f64,
    pub date_of_exam: DateTime<Utc>,
    pub graded_at: DateTime<Utc>,
}

/// A score record joined with its course, for academic-detail listings.
#[derive(Debug, Clone)]
pub struct StudentScoreRecord {
    pub id: i64,
    pub course_code: String,
    pub course_name: String,
    pub score_type: ScoreType,
    pub marks_obtained: f64,
    pub total_obtained: f64,
    pub date_of_exam: DateTime<Utc>,
}
