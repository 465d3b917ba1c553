use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::project::{ProjectRow, TimeLogRow};
use crate::state::AppState;

/// A project plus its derived hourly rate.
#[derive(Debug, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: ProjectRow,
    pub hourly_rate: f64,
}

impl From<ProjectRow> for ProjectView {
    fn from(project: ProjectRow) -> Self {
        let hourly_rate = project.hourly_rate();
        Self {
            project,
            hourly_rate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectView>,
}

/// GET /api/v1/projects/:user_id
pub async fn handle_list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProjectListResponse>, AppError> {
    auth.require_owner(user_id)?;

    let projects = sqlx::query_as::<_, ProjectRow>(
        "SELECT * FROM projects WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ProjectListResponse {
        projects: projects.into_iter().map(ProjectView::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub user_id: Uuid,
    pub title: String,
    pub client_name: Option<String>,
    pub description: Option<String>,
    pub budget: f64,
}

/// POST /api/v1/projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectView>), AppError> {
    auth.require_owner(req.user_id)?;
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Project title is required".to_string()));
    }
    if req.budget < 0.0 {
        return Err(AppError::Validation("Budget must not be negative".to_string()));
    }

    let project = sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects (user_id, title, client_name, description, budget)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(req.user_id)
    .bind(req.title.trim())
    .bind(&req.client_name)
    .bind(&req.description)
    .bind(req.budget)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

#[derive(Debug, Deserialize)]
pub struct CreateTimeLogRequest {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub description: Option<String>,
    pub hours: f64,
    pub date_logged: Option<NaiveDate>,
}

/// POST /api/v1/time-logs
///
/// Records hours against an owned project and accumulates the project's
/// hours_worked in the same transaction.
pub async fn handle_create_time_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTimeLogRequest>,
) -> Result<(StatusCode, Json<TimeLogRow>), AppError> {
    auth.require_owner(req.user_id)?;
    if req.hours <= 0.0 {
        return Err(AppError::Validation("Hours must be positive".to_string()));
    }

    let mut tx = state.db.begin().await?;

    let project: Option<ProjectRow> =
        sqlx::query_as("SELECT * FROM projects WHERE id = $1 AND user_id = $2")
            .bind(req.project_id)
            .bind(req.user_id)
            .fetch_optional(&mut *tx)
            .await?;
    if project.is_none() {
        return Err(AppError::NotFound(format!(
            "Project {} not found",
            req.project_id
        )));
    }

    let log = sqlx::query_as::<_, TimeLogRow>(
        r#"
        INSERT INTO time_logs (user_id, project_id, description, hours, date_logged)
        VALUES ($1, $2, $3, $4, COALESCE($5, CURRENT_DATE))
        RETURNING *
        "#,
    )
    .bind(req.user_id)
    .bind(req.project_id)
    .bind(&req.description)
    .bind(req.hours)
    .bind(req.date_logged)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE projects SET hours_worked = hours_worked + $1 WHERE id = $2")
        .bind(req.hours)
        .bind(req.project_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(log)))
}
