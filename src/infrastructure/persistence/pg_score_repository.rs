//! PostgreSQL implementation of the score repository.
//!
//! The totals queries sum per student in SQL; ranking happens afterwards in
//! the domain layer. Optional filters are pushed down as nullable binds so
//! one statement covers every filter combination.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{
    CourseScore, DepartmentType, ScorePatch, ScorePoint, ScoreType, ScoreUpsert,
    StudentScoreRecord,
};
use crate::domain::ranking::ScoreEntry;
use crate::domain::repositories::{ScoreFilter, ScoreRepository};
use crate::error::AppError;
use serde_json::json;

pub struct PgScoreRepository {
    pool: Arc<PgPool>,
}

impl PgScoreRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TotalsRow {
    student_id: i64,
    name: String,
    email: String,
    enrollment_number: String,
    total_marks: f64,
}

impl From<TotalsRow> for ScoreEntry {
    fn from(r: TotalsRow) -> Self {
        ScoreEntry {
            student_id: r.student_id,
            name: r.name,
            email: r.email,
            enrollment_number: r.enrollment_number,
            total_marks: r.total_marks,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ScoreRow {
    id: i64,
    student_id: i64,
    course_id: i64,
    score_type: String,
    marks_obtained: f64,
    total_obtained: f64,
    date_of_exam: DateTime<Utc>,
    graded_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ScoreRow> for CourseScore {
    type Error = AppError;

    fn try_from(r: ScoreRow) -> Result<Self, AppError> {
        Ok(CourseScore {
            id: r.id,
            student_id: r.student_id,
            course_id: r.course_id,
            score_type: parse_score_type(&r.score_type)?,
            marks_obtained: r.marks_obtained,
            total_obtained: r.total_obtained,
            date_of_exam: r.date_of_exam,
            graded_at: r.graded_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PointRow {
    marks_obtained: f64,
    total_obtained: f64,
    date_of_exam: DateTime<Utc>,
    graded_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct RecordRow {
    id: i64,
    course_code: String,
    course_name: String,
    score_type: String,
    marks_obtained: f64,
    total_obtained: f64,
    date_of_exam: DateTime<Utc>,
}

fn parse_score_type(value: &str) -> Result<ScoreType, AppError> {
    ScoreType::from_str(value).map_err(|_| {
        AppError::internal(
            "Stored score type is not a known assessment kind",
            json!({ "score_type": value }),
        )
    })
}

#[async_trait]
impl ScoreRepository for PgScoreRepository {
    async fn batch_totals(
        &self,
        center_id: i64,
        batch_id: i64,
        filter: &ScoreFilter,
    ) -> Result<Vec<ScoreEntry>, AppError> {
        let rows = sqlx::query_as::<_, TotalsRow>(
            r#"
            SELECT s.id AS student_id, s.name, s.email, s.enrollment_number,
                   COALESCE(SUM(cs.marks_obtained), 0)::double precision AS total_marks
            FROM students s
            LEFT JOIN course_scores cs
                   ON cs.student_id = s.id
                  AND ($3::bigint IS NULL OR cs.course_id = $3)
                  AND ($4::text IS NULL OR cs.score_type = $4)
            WHERE s.center_id = $1
              AND s.batch_id = $2
              AND ($5::int IS NULL OR s.semester_no >= $5)
            GROUP BY s.id, s.name, s.email, s.enrollment_number
            "#,
        )
        .bind(center_id)
        .bind(batch_id)
        .bind(filter.course_id)
        .bind(filter.score_type.map(|t| t.as_str()))
        .bind(filter.min_semester)
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(ScoreEntry::from).collect())
    }

    async fn department_totals(
        &self,
        department: DepartmentType,
        filter: &ScoreFilter,
    ) -> Result<Vec<ScoreEntry>, AppError> {
        let rows = sqlx::query_as::<_, TotalsRow>(
            r#"
            SELECT s.id AS student_id, s.name, s.email, s.enrollment_number,
                   COALESCE(SUM(cs.marks_obtained), 0)::double precision AS total_marks
            FROM students s
            JOIN departments d ON d.id = s.department_id
            LEFT JOIN course_scores cs
                   ON cs.student_id = s.id
                  AND ($2::bigint IS NULL OR cs.course_id = $2)
                  AND ($3::text IS NULL OR cs.score_type = $3)
            WHERE d.name = $1
              AND ($4::int IS NULL OR s.semester_no >= $4)
            GROUP BY s.id, s.name, s.email, s.enrollment_number
            "#,
        )
        .bind(department.as_str())
        .bind(filter.course_id)
        .bind(filter.score_type.map(|t| t.as_str()))
        .bind(filter.min_semester)
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(ScoreEntry::from).collect())
    }

    async fn series(
        &self,
        student_id: i64,
        course_id: i64,
        score_type: ScoreType,
    ) -> Result<Vec<ScorePoint>, AppError> {
        let rows = sqlx::query_as::<_, PointRow>(
            r#"
            SELECT marks_obtained, total_obtained, date_of_exam, graded_at
            FROM course_scores
            WHERE student_id = $1 AND course_id = $2 AND score_type = $3
            ORDER BY date_of_exam ASC
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .bind(score_type.as_str())
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ScorePoint {
                marks_obtained: r.marks_obtained,
                total_obtained: r.total_obtained,
                date_of_exam: r.date_of_exam,
                graded_at: r.graded_at,
            })
            .collect())
    }

    async fn list_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<StudentScoreRecord>, AppError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT cs.id, co.code AS course_code, co.name AS course_name,
                   cs.score_type, cs.marks_obtained, cs.total_obtained, cs.date_of_exam
            FROM course_scores cs
            JOIN courses co ON co.id = cs.course_id
            WHERE cs.student_id = $1
            ORDER BY cs.date_of_exam ASC
            "#,
        )
        .bind(student_id)
        .fetch_all(&*self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(StudentScoreRecord {
                    id: r.id,
                    course_code: r.course_code,
                    course_name: r.course_name,
                    score_type: parse_score_type(&r.score_type)?,
                    marks_obtained: r.marks_obtained,
                    total_obtained: r.total_obtained,
                    date_of_exam: r.date_of_exam,
                })
            })
            .collect()
    }

    async fn upsert(&self, upsert: ScoreUpsert) -> Result<CourseScore, AppError> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            INSERT INTO course_scores
                (student_id, course_id, score_type, marks_obtained, total_obtained, date_of_exam)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (student_id, course_id, score_type) DO UPDATE
               SET marks_obtained = EXCLUDED.marks_obtained,
                   total_obtained = EXCLUDED.total_obtained,
                   date_of_exam = EXCLUDED.date_of_exam,
                   updated_at = now()
            RETURNING id, student_id, course_id, score_type, marks_obtained,
                      total_obtained, date_of_exam, graded_at, updated_at
            "#,
        )
        .bind(upsert.student_id)
        .bind(upsert.course_id)
        .bind(upsert.score_type.as_str())
        .bind(upsert.marks_obtained)
        .bind(upsert.total_obtained)
        .bind(upsert.date_of_exam)
        .fetch_one(&*self.pool)
        .await?;

        CourseScore::try_from(row)
    }

    async fn update(&self, id: i64, patch: ScorePatch) -> Result<Option<CourseScore>, AppError> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            UPDATE course_scores
               SET score_type = COALESCE($2, score_type),
                   marks_obtained = COALESCE($3, marks_obtained),
                   total_obtained = COALESCE($4, total_obtained),
                   date_of_exam = COALESCE($5, date_of_exam),
                   updated_at = now()
             WHERE id = $1
            RETURNING id, student_id, course_id, score_type, marks_obtained,
                      total_obtained, date_of_exam, graded_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.score_type.map(|t| t.as_str()))
        .bind(patch.marks_obtained)
        .bind(patch.total_obtained)
        .bind(patch.date_of_exam)
        .fetch_optional(&*self.pool)
        .await?;

        row.map(CourseScore::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM course_scores WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
