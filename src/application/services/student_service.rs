//! Student profile, academic details and staff-facing rosters.

use std::sync::Arc;

use crate::domain::entities::{
    Course, Principal, StudentContext, StudentScoreRecord, StudentSummary,
};
use crate::domain::repositories::{CourseRepository, ScoreRepository, StudentRepository};
use crate::error::AppError;
use serde_json::json;

/// A student profile with its course count.
#[derive(Debug, Clone)]
pub struct StudentProfile {
    pub context: StudentContext,
    pub course_count: i64,
}

/// A student's enrolled courses together with every score on record.
#[derive(Debug, Clone)]
pub struct AcademicDetails {
    pub courses: Vec<Course>,
    pub scores: Vec<StudentScoreRecord>,
}

/// A center-wide roster for staff.
#[derive(Debug, Clone)]
pub struct CenterRoster {
    pub students: Vec<StudentSummary>,
    pub total_count: i64,
}

/// Service for student self-service reads and staff rosters.
pub struct StudentService {
    students: Arc<dyn StudentRepository>,
    courses: Arc<dyn CourseRepository>,
    scores: Arc<dyn ScoreRepository>,
}

impl StudentService {
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

    /// Returns the caller's own profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the student no longer exists.
    pub async fn profile(&self, student_id: i64) -> Result<StudentProfile, AppError> {
        let context = self.find_context(student_id).await?;
        let course_count = self.students.course_count(student_id).await?;

        Ok(StudentProfile {
            context,
            course_count,
        })
    }

    /// Returns the caller's enrolled courses and all recorded scores.
    pub async fn academic_details(&self, student_id: i64) -> Result<AcademicDetails, AppError> {
        self.find_context(student_id).await?;

        let courses = self.courses.list_for_student(student_id).await?;
        let scores = self.scores.list_for_student(student_id).await?;

        Ok(AcademicDetails { courses, scores })
    }

    /// Lists the students of a center for a staff principal.
    ///
    /// Center admins are pinned to their own center and may not pass a
    /// different one. Super admins must name the center explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] for non-staff principals and for
    /// center admins requesting a foreign center, [`AppError::Validation`]
    /// when a super admin omits `center_id`.
    pub async fn roster_for(
        &self,
        principal: &Principal,
        center_id: Option<i64>,
    ) -> Result<CenterRoster, AppError> {
        let center_id = match principal {
            Principal::Admin {
                center_id: own_center,
                ..
            } => match center_id {
                Some(requested) if requested != *own_center => {
                    return Err(AppError::forbidden(
                        "Admins may only list their own center",
                        json!({ "center_id": requested }),
                    ));
                }
                _ => *own_center,
            },
            Principal::SuperAdmin { .. } => center_id.ok_or_else(|| {
                AppError::bad_request("center_id is required for super admins", json!({}))
            })?,
            Principal::Teacher { .. } | Principal::Student { .. } => {
                return Err(AppError::forbidden(
                    "Only admins may list center rosters",
                    json!({ "role": principal.role().as_str() }),
                ));
            }
        };

        let students = self.students.list_by_center(center_id).await?;
        let total_count = self.students.count_by_center(center_id).await?;

        Ok(CenterRoster {
            students,
            total_count,
        })
    }

    async fn find_context(&self, student_id: i64) -> Result<StudentContext, AppError> {
        self.students
            .find_context(student_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Student not found", json!({ "student_id": student_id }))
            })
    }
}
