//! PostgreSQL implementation of the course repository.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::Course;
use crate::domain::repositories::CourseRepository;
use crate::error::AppError;

pub struct PgCourseRepository {
    pool: Arc<PgPool>,
}

impl PgCourseRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: i64,
    semester_id: i64,
    name: String,
    code: String,
    credits: i32,
}

impl From<CourseRow> for Course {
    fn from(r: CourseRow) -> Self {
        Course {
            id: r.id,
            semester_id: r.semester_id,
            name: r.name,
            code: r.code,
            credits: r.credits,
        }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn find_in_batch_semester(
        &self,
        batch_id: i64,
        semester_no: i32,
        code: &str,
    ) -> Result<Option<Course>, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT co.id, co.semester_id, co.name, co.code, co.credits
            FROM courses co
            JOIN semesters se ON se.id = co.semester_id
            WHERE se.batch_id = $1 AND se.number = $2 AND co.code = $3
            "#,
        )
        .bind(batch_id)
        .bind(semester_no)
        .bind(code)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(Course::from))
    }

    async fn find_enrolled_by_code(
        &self,
        student_id: i64,
        code: &str,
    ) -> Result<Option<Course>, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT co.id, co.semester_id, co.name, co.code, co.credits
            FROM courses co
            JOIN student_courses sc ON sc.course_id = co.id
            WHERE sc.student_id = $1 AND co.code = $2
            ORDER BY co.id DESC
            LIMIT 1
            "#,
        )
        .bind(student_id)
        .bind(code)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(Course::from))
    }

    async fn list_for_student(&self, student_id: i64) -> Result<Vec<Course>, AppError> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT co.id, co.semester_id, co.name, co.code, co.credits
            FROM courses co
            JOIN student_courses sc ON sc.course_id = co.id
            WHERE sc.student_id = $1
            ORDER BY co.code
            "#,
        )
        .bind(student_id)
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(Course::from).collect())
    }
}
