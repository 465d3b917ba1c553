use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{
    hash_password, verify_password, AuthUser, MIN_PASSWORD_LEN, TOKEN_TTL_HOURS,
};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
    #[serde(default)]
    pub hourly_rate: f64,
}

fn default_experience_level() -> String {
    "beginner".to_string()
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation("Email already registered".to_string()));
    }

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (email, password_digest, full_name, skills, experience_level, hourly_rate)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&req.email)
    .bind(hash_password(&req.password))
    .bind(&req.full_name)
    .bind(&req.skills)
    .bind(&req.experience_level)
    .bind(req.hourly_rate)
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: Uuid,
    pub token_type: String,
    pub user: User,
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;

    let user = match user {
        Some(u) if verify_password(&req.password, &u.password_digest) => u,
        _ => return Err(AppError::Unauthorized),
    };

    let access_token: Uuid = sqlx::query_scalar(
        "INSERT INTO auth_tokens (user_id, expires_at) VALUES ($1, $2) RETURNING token",
    )
    .bind(user.id)
    .bind(Utc::now() + Duration::hours(TOKEN_TTL_HOURS))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        user,
    }))
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<LogoutResponse>, AppError> {
    sqlx::query("DELETE FROM auth_tokens WHERE token = $1")
        .bind(auth.token)
        .execute(&state.db)
        .await?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
