//! PostgreSQL implementation of the student repository.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::{DepartmentType, StudentContext, StudentSummary};
use crate::domain::repositories::StudentRepository;
use crate::error::AppError;
use serde_json::json;

pub struct PgStudentRepository {
    pool: Arc<PgPool>,
}

impl PgStudentRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ContextRow {
    id: i64,
    name: String,
    email: String,
    gender: Option<String>,
    phone_number: Option<String>,
    enrollment_number: String,
    semester_no: i32,
    center_id: i64,
    center_name: String,
    center_location: String,
    department_id: i64,
    department_name: String,
    batch_id: i64,
    batch_name: String,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    name: String,
    email: String,
    enrollment_number: String,
    semester_no: i32,
    center_name: String,
    department_name: String,
    batch_name: String,
}

fn parse_department(name: &str) -> Result<DepartmentType, AppError> {
    DepartmentType::from_str(name).map_err(|_| {
        AppError::internal(
            "Stored department name is not a known department type",
            json!({ "department": name }),
        )
    })
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn find_context(&self, id: i64) -> Result<Option<StudentContext>, AppError> {
        let row = sqlx::query_as::<_, ContextRow>(
            r#"
            SELECT s.id, s.name, s.email, s.gender, s.phone_number,
                   s.enrollment_number, s.semester_no,
                   c.id AS center_id, c.name AS center_name, c.location AS center_location,
                   d.id AS department_id, d.name AS department_name,
                   b.id AS batch_id, b.name AS batch_name
            FROM students s
            JOIN centers c ON c.id = s.center_id
            JOIN departments d ON d.id = s.department_id
            JOIN batches b ON b.id = s.batch_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        row.map(|r| {
            Ok(StudentContext {
                id: r.id,
                name: r.name,
                email: r.email,
                gender: r.gender,
                phone_number: r.phone_number,
                enrollment_number: r.enrollment_number,
                semester_no: r.semester_no,
                center_id: r.center_id,
                center_name: r.center_name,
                center_location: r.center_location,
                department_id: r.department_id,
                department: parse_department(&r.department_name)?,
                batch_id: r.batch_id,
                batch_name: r.batch_name,
            })
        })
        .transpose()
    }

    async fn find_id_by_enrollment(
        &self,
        enrollment_number: &str,
    ) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM students WHERE enrollment_number = $1",
        )
        .bind(enrollment_number)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(id)
    }

    async fn list_by_center(&self, center_id: i64) -> Result<Vec<StudentSummary>, AppError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT s.id, s.name, s.email, s.enrollment_number, s.semester_no,
                   c.name AS center_name, d.name AS department_name, b.name AS batch_name
            FROM students s
            JOIN centers c ON c.id = s.center_id
            JOIN departments d ON d.id = s.department_id
            JOIN batches b ON b.id = s.batch_id
            WHERE s.center_id = $1
            ORDER BY s.enrollment_number
            "#,
        )
        .bind(center_id)
        .fetch_all(&*self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(StudentSummary {
                    id: r.id,
                    name: r.name,
                    email: r.email,
                    enrollment_number: r.enrollment_number,
                    semester_no: r.semester_no,
                    center_name: r.center_name,
                    department: parse_department(&r.department_name)?,
                    batch_name: r.batch_name,
                })
            })
            .collect()
    }

    async fn count_by_center(&self, center_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE center_id = $1")
                .bind(center_id)
                .fetch_one(&*self.pool)
                .await?;

        Ok(count)
    }

    async fn course_count(&self, student_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM student_courses WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_one(&*self.pool)
        .await?;

        Ok(count)
    }
}
