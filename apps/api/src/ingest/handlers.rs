use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{fetch_user, AuthUser};
use crate::errors::AppError;
use crate::ingest::{run_job_search, PgOpportunityStore, HIGH_MATCH_THRESHOLD};
use crate::models::job::JobOpportunityRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobOpportunityRow>,
    pub total_found: usize,
    pub high_match_jobs: usize,
}

/// POST /api/v1/jobs/search/:user_id
///
/// Runs one synchronous ingestion cycle. Scrape and scoring degradation is
/// absorbed inside the pipeline; only storage failures surface here.
pub async fn handle_job_search(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<JobSearchResponse>, AppError> {
    auth.require_owner(user_id)?;
    let user = fetch_user(&state.db, user_id).await?;

    let mut store = PgOpportunityStore::begin(&state.db).await?;
    let outcome = run_job_search(
        &mut store,
        state.scraper.as_ref(),
        state.scorer.as_ref(),
        &user.skills_list(),
    )
    .await?;

    Ok(Json(JobSearchResponse {
        total_found: outcome.total_found,
        high_match_jobs: outcome.high_match.len(),
        jobs: outcome.high_match,
    }))
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobOpportunityRow>,
}

/// GET /api/v1/jobs/:user_id
///
/// Active high-match opportunities, best first.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<JobListResponse>, AppError> {
    auth.require_owner(user_id)?;

    let jobs = sqlx::query_as::<_, JobOpportunityRow>(
        r#"
        SELECT * FROM job_opportunities
        WHERE match_score > $1 AND is_active = TRUE
        ORDER BY match_score DESC
        LIMIT 20
        "#,
    )
    .bind(HIGH_MATCH_THRESHOLD)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(JobListResponse { jobs }))
}
