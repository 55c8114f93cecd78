//! Login and bearer-token authentication.
//!
//! Tokens are opaque random strings; only their HMAC-SHA256 hash is stored,
//! keyed by the `TOKEN_SIGNING_SECRET`. Password hashes use the same keyed
//! construction.

use std::sync::Arc;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::entities::{Principal, Role};
use crate::domain::repositories::{PrincipalRepository, SessionRepository};
use crate::error::AppError;
use crate::utils::token::generate_token;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Service handling login and per-request token verification.
pub struct AuthService {
    principals: Arc<dyn PrincipalRepository>,
    sessions: Arc<dyn SessionRepository>,
    signing_secret: String,
}

impl AuthService {
    pub fn new(
        principals: Arc<dyn PrincipalRepository>,
        sessions: Arc<dyn SessionRepository>,
        signing_secret: String,
    ) -> Self {
        Self {
            principals,
            sessions,
            signing_secret,
        }
    }

    /// Verifies credentials for a role and opens a session.
    ///
    /// # Returns
    ///
    /// The raw bearer token. It is shown once and never stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email or a wrong
    /// password. The two cases are indistinguishable to the caller.
    pub async fn login(
        &self,
        role: Role,
        email: &str,
        password: &str,
    ) -> Result<String, AppError> {
        let credentials = self
            .principals
            .find_credentials(role, email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials", json!({})))?;

        if self.keyed_hash(password) != credentials.password_hash {
            return Err(AppError::unauthorized("Invalid credentials", json!({})));
        }

        let token = generate_token();
        self.sessions
            .create(&self.keyed_hash(&token), role, credentials.id)
            .await?;

        tracing::info!(role = role.as_str(), principal_id = credentials.id, "login");

        Ok(token)
    }

    /// Resolves a bearer token to a live principal.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token matches no active
    /// session or the account behind it no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        let token_hash = self.keyed_hash(token);

        let session = self
            .sessions
            .find_active(&token_hash)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired token", json!({})))?;

        let principal = self
            .principals
            .resolve(session.role, session.principal_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists", json!({})))?;

        self.sessions.touch(&token_hash).await?;

        Ok(principal)
    }

    /// Keyed hash used for both passwords and session tokens.
    pub fn password_hash(&self, password: &str) -> String {
        self.keyed_hash(password)
    }

    fn keyed_hash(&self, input: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(input.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
