//! Leaderboard query parameters and response bodies.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::{BatchLeaderboard, DepartmentLeaderboard};
use crate::domain::entities::{DepartmentType, ScoreType};
use crate::domain::ranking::RankedStudent;

/// Query parameters shared by both leaderboard endpoints.
///
/// Uses `serde_with` to parse the semester number from query strings as an
/// integer.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub course_code: Option<String>,

    #[serde(default)]
    pub score_type: Option<ScoreType>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub semester: Option<i32>,
}

/// One ranked row of a leaderboard.
#[derive(Debug, Serialize)]
pub struct RankedStudentDto {
    pub rank: u32,
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub enrollment_number: String,
    pub total_marks: f64,
}

impl From<RankedStudent> for RankedStudentDto {
    fn from(s: RankedStudent) -> Self {
        RankedStudentDto {
            rank: s.rank,
            student_id: s.student_id,
            name: s.name,
            email: s.email,
            enrollment_number: s.enrollment_number,
            total_marks: s.total_marks,
        }
    }
}

/// Course reference echoed back when a course filter was applied.
#[derive(Debug, Serialize)]
pub struct CourseRefDto {
    pub code: String,
    pub name: String,
}

/// Response for `GET /student/get-batch-leaderboard`.
#[derive(Debug, Serialize)]
pub struct BatchLeaderboardResponse {
    pub center_name: String,
    pub center_location: String,
    pub department: DepartmentType,
    pub batch_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseRefDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_type: Option<ScoreType>,
    pub student_rank: Option<u32>,
    pub student_total_marks: f64,
    pub total_students: usize,
    pub students: Vec<RankedStudentDto>,
}

impl From<BatchLeaderboard> for BatchLeaderboardResponse {
    fn from(board: BatchLeaderboard) -> Self {
        BatchLeaderboardResponse {
            center_name: board.center_name,
            center_location: board.center_location,
            department: board.department,
            batch_name: board.batch_name,
            semester: board.semester,
            course: board.course.map(|c| CourseRefDto {
                code: c.code,
                name: c.name,
            }),
            score_type: board.score_type,
            student_rank: board.student_rank,
            student_total_marks: board.student_total_marks,
            total_students: board.total_students,
            students: board.students.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response for `GET /student/get-department-leaderboard`.
#[derive(Debug, Serialize)]
pub struct DepartmentLeaderboardResponse {
    pub department: DepartmentType,
    pub total_students: usize,
    pub your_rank: Option<u32>,
    pub your_total_marks: Option<f64>,
    pub your_center: String,
    pub your_department: DepartmentType,
    pub students: Vec<RankedStudentDto>,
}

impl From<DepartmentLeaderboard> for DepartmentLeaderboardResponse {
    fn from(board: DepartmentLeaderboard) -> Self {
        DepartmentLeaderboardResponse {
            department: board.department,
            total_students: board.total_students,
            your_rank: board.your_rank,
            your_total_marks: board.your_total_marks,
            your_center: board.your_center,
            your_department: board.your_department,
            students: board.students.into_iter().map(Into::into).collect(),
        }
    }
}
