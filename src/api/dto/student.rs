//! Student self-service and roster bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::{AcademicDetails, CenterRoster, StudentProfile};
use crate::domain::entities::{DepartmentType, ScoreType};

/// Response for `GET /student/me`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub enrollment_number: String,
    pub semester_no: i32,
    pub center_name: String,
    pub center_location: String,
    pub department: DepartmentType,
    pub batch_name: String,
    pub course_count: i64,
}

impl From<StudentProfile> for ProfileResponse {
    fn from(profile: StudentProfile) -> Self {
        let c = profile.context;
        ProfileResponse {
            id: c.id,
            name: c.name,
            email: c.email,
            gender: c.gender,
            phone_number: c.phone_number,
            enrollment_number: c.enrollment_number,
            semester_no: c.semester_no,
            center_name: c.center_name,
            center_location: c.center_location,
            department: c.department,
            batch_name: c.batch_name,
            course_count: profile.course_count,
        }
    }
}

/// An enrolled course.
#[derive(Debug, Serialize)]
pub struct CourseDto {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub credits: i32,
}

/// A score record joined with its course.
#[derive(Debug, Serialize)]
pub struct ScoreRecordDto {
    pub id: i64,
    pub course_code: String,
    pub course_name: String,
    pub score_type: ScoreType,
    pub marks_obtained: f64,
    pub total_obtained: f64,
    pub date_of_exam: DateTime<Utc>,
}

/// Response for `GET /student/academic-details`.
#[derive(Debug, Serialize)]
pub struct AcademicDetailsResponse {
    pub courses: Vec<CourseDto>,
    pub scores: Vec<ScoreRecordDto>,
}

impl From<AcademicDetails> for AcademicDetailsResponse {
    fn from(details: AcademicDetails) -> Self {
        AcademicDetailsResponse {
            courses: details
                .courses
                .into_iter()
                .map(|c| CourseDto {
                    id: c.id,
                    name: c.name,
                    code: c.code,
                    credits: c.credits,
                })
                .collect(),
            scores: details
                .scores
                .into_iter()
                .map(|s| ScoreRecordDto {
                    id: s.id,
                    course_code: s.course_code,
                    course_name: s.course_name,
                    score_type: s.score_type,
                    marks_obtained: s.marks_obtained,
                    total_obtained: s.total_obtained,
                    date_of_exam: s.date_of_exam,
                })
                .collect(),
        }
    }
}

/// Query parameters for `GET /admin/students`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub center: Option<i64>,
}

/// One roster row.
#[derive(Debug, Serialize)]
pub struct RosterStudentDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub enrollment_number: String,
    pub semester_no: i32,
    pub center_name: String,
    pub department: DepartmentType,
    pub batch_name: String,
}

/// Response for `GET /admin/students`.
#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub total_count: i64,
    pub students: Vec<RosterStudentDto>,
}

impl From<CenterRoster> for RosterResponse {
    fn from(roster: CenterRoster) -> Self {
        RosterResponse {
            total_count: roster.total_count,
            students: roster
                .students
                .into_iter()
                .map(|s| RosterStudentDto {
                    id: s.id,
                    name: s.name,
                    email: s.email,
                    enrollment_number: s.enrollment_number,
                    semester_no: s.semester_no,
                    center_name: s.center_name,
                    department: s.department,
                    batch_name: s.batch_name,
                })
                .collect(),
        }
    }
}
