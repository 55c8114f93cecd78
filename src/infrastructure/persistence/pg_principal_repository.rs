//! PostgreSQL implementation of the principal repository.
//!
//! Credentials and identities live in role-specific tables (students,
//! teachers, admins); this repository hides the table dispatch behind the
//! role tag.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::{Credentials, Principal, Role};
use crate::domain::repositories::PrincipalRepository;
use crate::error::AppError;
use serde_json::json;

pub struct PgPrincipalRepository {
    pool: Arc<PgPool>,
}

impl PgPrincipalRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: i64,
    password_hash: String,
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: i64,
    role: String,
    center_id: Option<i64>,
}

#[async_trait]
impl PrincipalRepository for PgPrincipalRepository {
    async fn find_credentials(
        &self,
        role: Role,
        email: &str,
    ) -> Result<Option<Credentials>, AppError> {
        let query = match role {
            Role::Student => "SELECT id, password_hash FROM students WHERE email = $1",
            Role::Teacher => "SELECT id, password_hash FROM teachers WHERE email = $1",
            Role::Admin => {
                "SELECT id, password_hash FROM admins WHERE email = $1 AND role = 'ADMIN'"
            }
            Role::SuperAdmin => {
                "SELECT id, password_hash FROM admins WHERE email = $1 AND role = 'SUPER_ADMIN'"
            }
        };

        let row = sqlx::query_as::<_, CredentialsRow>(query)
            .bind(email)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(row.map(|r| Credentials {
            id: r.id,
            password_hash: r.password_hash,
        }))
    }

    async fn resolve(&self, role: Role, id: i64) -> Result<Option<Principal>, AppError> {
        match role {
            Role::Student => {
                let exists =
                    sqlx::query_scalar::<_, i64>("SELECT id FROM students WHERE id = $1")
                        .bind(id)
                        .fetch_optional(&*self.pool)
                        .await?;
                Ok(exists.map(|id| Principal::Student { id }))
            }
            Role::Teacher => {
                let exists =
                    sqlx::query_scalar::<_, i64>("SELECT id FROM teachers WHERE id = $1")
                        .bind(id)
                        .fetch_optional(&*self.pool)
                        .await?;
                Ok(exists.map(|id| Principal::Teacher { id }))
            }
            Role::Admin | Role::SuperAdmin => {
                let row = sqlx::query_as::<_, AdminRow>(
                    "SELECT id, role, center_id FROM admins WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&*self.pool)
                .await?;

                match row {
                    None => Ok(None),
                    Some(r) if r.role == "SUPER_ADMIN" => {
                        Ok(Some(Principal::SuperAdmin { id: r.id }))
                    }
                    Some(r) => {
                        let center_id = r.center_id.ok_or_else(|| {
                            AppError::internal(
                                "Center admin has no center assigned",
                                json!({ "admin_id": r.id }),
                            )
                        })?;
                        Ok(Some(Principal::Admin {
                            id: r.id,
                            center_id,
                        }))
                    }
                }
            }
        }
    }

    async fn create_admin(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        center_id: Option<i64>,
    ) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO admins (name, email, password_hash, role, center_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(center_id)
        .fetch_one(&*self.pool)
        .await?;

        Ok(id)
    }
}
