//! Authenticated caller identity.
//!
//! Role dispatch is a tagged variant type rather than string switching: each
//! role resolves through a single [`crate::domain::repositories::PrincipalRepository`]
//! lookup and handlers match on the variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role tag carried by sessions and login requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Teacher,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDENT" => Ok(Role::Student),
            "TEACHER" => Ok(Role::Teacher),
            "ADMIN" => Ok(Role::Admin),
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// A verified caller. Constructed by the auth service after session and
/// existence checks; injected into request extensions by the middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Student { id: i64 },
    Teacher { id: i64 },
    /// Center admins are pinned to their own center.
    Admin { id: i64, center_id: i64 },
    SuperAdmin { id: i64 },
}

impl Principal {
    pub fn id(&self) -> i64 {
        match *self {
            Principal::Student { id }
            | Principal::Teacher { id }
            | Principal::Admin { id, .. }
            | Principal::SuperAdmin { id } => id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Principal::Student { .. } => Role::Student,
            Principal::Teacher { .. } => Role::Teacher,
            Principal::Admin { .. } => Role::Admin,
            Principal::SuperAdmin { .. } => Role::SuperAdmin,
        }
    }

    /// Admins and super admins may manage records; students and teachers
    /// may not.
    pub fn is_staff(&self) -> bool {
        matches!(self, Principal::Admin { .. } | Principal::SuperAdmin { .. })
    }
}

/// Stored credentials resolved during login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub id: i64,
    pub password_hash: String,
}

/// A bearer session row. Only the token hash is ever stored.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub role: Role,
    pub principal_id: i64,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Student, Role::Teacher, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_principal_accessors() {
        let p = Principal::Admin {
            id: 7,
            center_id: 2,
        };
        assert_eq!(p.id(), 7);
        assert_eq!(p.role(), Role::Admin);
        assert!(p.is_staff());

        let s = Principal::Student { id: 3 };
        assert_eq!(s.role(), Role::Student);
        assert!(!s.is_staff());
    }
}
