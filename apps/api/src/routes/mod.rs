pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advisor::handlers as advisor;
use crate::auth::handlers as auth;
use crate::ingest::handlers as jobs;
use crate::projects::handlers as projects;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        // Job ingestion + listing
        .route("/api/v1/jobs/search/:user_id", post(jobs::handle_job_search))
        .route("/api/v1/jobs/:user_id", get(jobs::handle_list_jobs))
        // Proposals
        .route(
            "/api/v1/proposals/generate",
            post(advisor::handle_generate_proposal),
        )
        .route(
            "/api/v1/proposals/:user_id",
            get(advisor::handle_list_proposals),
        )
        // Projects + time tracking
        .route("/api/v1/projects", post(projects::handle_create_project))
        .route(
            "/api/v1/projects/:user_id",
            get(projects::handle_list_projects),
        )
        .route("/api/v1/time-logs", post(projects::handle_create_time_log))
        // Analytics + advice
        .route("/api/v1/analytics/:user_id", get(advisor::handle_analytics))
        .route(
            "/api/v1/skill-gaps/:user_id",
            get(advisor::handle_list_skill_gaps),
        )
        .route(
            "/api/v1/skill-gaps/analyze/:user_id",
            post(advisor::handle_analyze_skill_gaps),
        )
        .route(
            "/api/v1/communications/respond",
            post(advisor::handle_communication),
        )
        .with_state(state)
}
