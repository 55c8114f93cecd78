//! Leaderboard aggregation and ranking service.
//!
//! Orchestrates the two halves of the ranking engine: the score aggregator
//! (grouped total reads scoped to the reference student's batch or
//! department) and the rank assigner ([`crate::domain::ranking`]). Every
//! call works over a fresh snapshot; nothing is cached or written back.

use std::sync::Arc;

use crate::domain::entities::{DepartmentType, ScorePoint, ScoreType, StudentContext};
use crate::domain::ranking::{self, RankedStudent};
use crate::domain::repositories::{
    CourseRepository, ScoreFilter, ScoreRepository, StudentRepository,
};
use crate::error::AppError;
use serde_json::json;

/// Optional filters narrowing a leaderboard request.
///
/// `course_code` requires `semester`: codes are only unique per semester
/// offering, so the pair is what identifies a course within the reference
/// student's batch.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardFilters {
    pub course_code: Option<String>,
    pub score_type: Option<ScoreType>,
    pub semester: Option<i32>,
}

/// Display reference for a resolved course filter.
#[derive(Debug, Clone)]
pub struct CourseRef {
    pub code: String,
    pub name: String,
}

/// A batch-scoped leaderboard with the caller's own placement extracted.
#[derive(Debug, Clone)]
pub struct BatchLeaderboard {
    pub center_name: String,
    pub center_location: String,
    pub department: DepartmentType,
    pub batch_name: String,
    pub semester: Option<i32>,
    pub course: Option<CourseRef>,
    pub score_type: Option<ScoreType>,
    pub student_rank: Option<u32>,
    pub student_total_marks: f64,
    pub students: Vec<RankedStudent>,
    pub total_students: usize,
}

/// A department-scoped leaderboard spanning all centers.
#[derive(Debug, Clone)]
pub struct DepartmentLeaderboard {
    pub department: DepartmentType,
    pub total_students: usize,
    pub your_rank: Option<u32>,
    pub your_total_marks: Option<f64>,
    pub your_center: String,
    pub your_department: DepartmentType,
    pub students: Vec<RankedStudent>,
}

/// The caller's own date-ordered score history for one course and type.
#[derive(Debug, Clone)]
pub struct CourseGraph {
    pub course: CourseRef,
    pub score_type: ScoreType,
    pub scores: Vec<ScorePoint>,
}

/// Service computing batch and department leaderboards.
pub struct LeaderboardService {
    students: Arc<dyn StudentRepository>,
    courses: Arc<dyn CourseRepository>,
    scores: Arc<dyn ScoreRepository>,
}

impl LeaderboardService {
    /// Creates a new leaderboard service over injected repositories.
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

    /// Computes the leaderboard over all students sharing the caller's
    /// center and batch.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the caller or a filtered course
    /// cannot be resolved, [`AppError::Validation`] if `course_code` is
    /// supplied without `semester`, and [`AppError::Internal`] on database
    /// errors.
    pub async fn batch_leaderboard(
        &self,
        student_id: i64,
        filters: LeaderboardFilters,
    ) -> Result<BatchLeaderboard, AppError> {
        let reference = self.resolve_reference(student_id).await?;
        let (score_filter, course) = self.build_filter(&reference, &filters).await?;

        let entries = self
            .scores
            .batch_totals(reference.center_id, reference.batch_id, &score_filter)
            .await?;

        let students = ranking::assign_ranks(entries);
        let own = ranking::self_rank(&students, student_id);
        let total_students = students.len();

        Ok(BatchLeaderboard {
            center_name: reference.center_name,
            center_location: reference.center_location,
            department: reference.department,
            batch_name: reference.batch_name,
            semester: filters.semester,
            course,
            score_type: filters.score_type,
            student_rank: own.map(|(rank, _)| rank),
            student_total_marks: own.map(|(_, total)| total).unwrap_or(0.0),
            students,
            total_students,
        })
    }

    /// Computes the leaderboard over all students of the caller's
    /// department across every center.
    pub async fn department_leaderboard(
        &self,
        student_id: i64,
        filters: LeaderboardFilters,
    ) -> Result<DepartmentLeaderboard, AppError> {
        let reference = self.resolve_reference(student_id).await?;
        let (score_filter, _course) = self.build_filter(&reference, &filters).await?;

        let entries = self
            .scores
            .department_totals(reference.department, &score_filter)
            .await?;

        let students = ranking::assign_ranks(entries);
        let own = ranking::self_rank(&students, student_id);
        let total_students = students.len();

        Ok(DepartmentLeaderboard {
            department: reference.department,
            total_students,
            your_rank: own.map(|(rank, _)| rank),
            your_total_marks: own.map(|(_, total)| total),
            your_center: reference.center_name,
            your_department: reference.department,
            students,
        })
    }

    /// Returns the caller's own score history for one course and score
    /// type, date ascending. A degenerate aggregation: no peers, no ranks,
    /// no summing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the caller does not exist or is
    /// not enrolled in a course with that code.
    pub async fn course_graph(
        &self,
        student_id: i64,
        course_code: &str,
        score_type: ScoreType,
    ) -> Result<CourseGraph, AppError> {
        self.resolve_reference(student_id).await?;

        let course = self
            .courses
            .find_enrolled_by_code(student_id, course_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Course not found for student",
                    json!({ "course_code": course_code }),
                )
            })?;

        let scores = self
            .scores
            .series(student_id, course.id, score_type)
            .await?;

        Ok(CourseGraph {
            course: CourseRef {
                code: course.code,
                name: course.name,
            },
            score_type,
            scores,
        })
    }

    async fn resolve_reference(&self, student_id: i64) -> Result<StudentContext, AppError> {
        self.students
            .find_context(student_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Student not found", json!({ "student_id": student_id }))
            })
    }

    /// Translates request filters into a score filter, resolving a course
    /// code against the reference student's batch and semester.
    async fn build_filter(
        &self,
        reference: &StudentContext,
        filters: &LeaderboardFilters,
    ) -> Result<(ScoreFilter, Option<CourseRef>), AppError> {
        let course = match &filters.course_code {
            None => None,
            Some(code) => {
                let semester = filters.semester.ok_or_else(|| {
                    AppError::bad_request(
                        "semester is required when course_code is supplied",
                        json!({ "course_code": code }),
                    )
                })?;

                let course = self
                    .courses
                    .find_in_batch_semester(reference.batch_id, semester, code)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found(
                            "Course not found for code and semester in this batch",
                            json!({ "course_code": code, "semester": semester }),
                        )
                    })?;

                Some(course)
            }
        };

        let filter = ScoreFilter::new()
            .with_course(course.as_ref().map(|c| c.id))
            .with_score_type(filters.score_type)
            .with_min_semester(filters.semester);

        Ok((
            filter,
            course.map(|c| CourseRef {
                code: c.code,
                name: c.name,
            }),
        ))
    }
}
