//! PostgreSQL implementation of the session repository.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{Role, Session};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use serde_json::json;

pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    role: String,
    principal_id: i64,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    revoked_at: Option<DateTime<Utc>>,
}

impl TryFrom<SessionRow> for Session {
    type Error = AppError;

    fn try_from(r: SessionRow) -> Result<Self, AppError> {
        let role = Role::from_str(&r.role).map_err(|_| {
            AppError::internal(
                "Stored session role is not a known role",
                json!({ "role": r.role }),
            )
        })?;

        Ok(Session {
            id: r.id,
            role,
            principal_id: r.principal_id,
            created_at: r.created_at,
            last_used_at: r.last_used_at,
            revoked_at: r.revoked_at,
        })
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(
        &self,
        token_hash: &str,
        role: Role,
        principal_id: i64,
    ) -> Result<Session, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (token_hash, role, principal_id)
            VALUES ($1, $2, $3)
            RETURNING id, role, principal_id, created_at, last_used_at, revoked_at
            "#,
        )
        .bind(token_hash)
        .bind(role.as_str())
        .bind(principal_id)
        .fetch_one(&*self.pool)
        .await?;

        Session::try_from(row)
    }

    async fn find_active(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, role, principal_id, created_at, last_used_at, revoked_at
            FROM sessions
            WHERE token_hash = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&*self.pool)
        .await?;

        row.map(Session::try_from).transpose()
    }

    async fn touch(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET last_used_at = now() WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&*self.pool)
            .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Session>, AppError> {
        let rows = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, role, principal_id, created_at, last_used_at, revoked_at
            FROM sessions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        rows.into_iter().map(Session::try_from).collect()
    }

    async fn revoke(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = now() WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(id)
        .execute(&*self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Session not found or already revoked",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sessions WHERE revoked_at IS NULL",
        )
        .fetch_one(&*self.pool)
        .await?;

        Ok(count)
    }
}
