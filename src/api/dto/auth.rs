//! Login request and response bodies.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Role;

/// Body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub role: Role,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Successful login: the raw bearer token, shown once.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}
