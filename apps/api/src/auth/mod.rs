//! Bearer-token authentication and per-user authorization.
//!
//! Tokens are opaque UUIDs persisted with an expiry; a protected route
//! extracts `AuthUser` and then asserts ownership of the addressed user id
//! before doing any work.

pub mod handlers;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

pub const TOKEN_TTL_HOURS: i64 = 24;
pub const MIN_PASSWORD_LEN: usize = 6;
const SALT_LEN: usize = 16;

/// Salted SHA-256 digest, stored as `salt$hex`.
pub fn hash_password(password: &str) -> String {
    let salt: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect();
    format!("{salt}${}", digest(&salt, password))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, expected)) => digest(salt, password) == expected,
        None => false,
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Parses `Authorization: Bearer <uuid>`.
fn parse_bearer(header: &str) -> Option<Uuid> {
    header
        .strip_prefix("Bearer ")
        .and_then(|t| t.trim().parse::<Uuid>().ok())
}

/// The authenticated caller, resolved from the bearer token.
pub struct AuthUser {
    pub user: User,
    pub token: Uuid,
}

impl AuthUser {
    /// Ownership of the addressed user id is a precondition for every
    /// protected route; a mismatch is rejected before any work happens.
    pub fn require_owner(&self, user_id: Uuid) -> Result<(), AppError> {
        if self.user.id == user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = parse_bearer(header).ok_or(AppError::Unauthorized)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.* FROM users u
            JOIN auth_tokens t ON t.user_id = u.id
            WHERE t.token = $1 AND t.expires_at > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser { user, token })
    }
}

/// Loads a user row or maps its absence to a 404.
pub async fn fetch_user(pool: &PgPool, user_id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let stored = hash_password("hunter42");
        assert!(verify_password("hunter42", &stored));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let stored = hash_password("hunter42");
        assert!(!verify_password("hunter43", &stored));
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn test_malformed_digest_rejected() {
        assert!(!verify_password("anything", "no-separator-here"));
    }

    #[test]
    fn test_parse_bearer() {
        let id = Uuid::new_v4();
        assert_eq!(parse_bearer(&format!("Bearer {id}")), Some(id));
        assert_eq!(parse_bearer("Bearer not-a-uuid"), None);
        assert_eq!(parse_bearer("Basic abc"), None);
    }
}
