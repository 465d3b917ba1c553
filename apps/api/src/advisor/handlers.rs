use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advisor::communication::generate_communication_response;
use crate::advisor::pricing::{pricing_suggestion, PricingSuggestion};
use crate::advisor::proposals::generate_proposal;
use crate::advisor::skill_gaps::analyze_skill_gaps;
use crate::auth::{fetch_user, AuthUser};
use crate::errors::AppError;
use crate::ingest::HIGH_MATCH_THRESHOLD;
use crate::models::communication::ClientCommunicationRow;
use crate::models::job::JobOpportunityRow;
use crate::models::proposal::ProposalRow;
use crate::models::skill_gap::SkillGapRow;
use crate::state::AppState;

// ─── Proposals ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateProposalRequest {
    pub user_id: Uuid,
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GenerateProposalResponse {
    pub message: String,
    pub proposal: ProposalRow,
}

/// POST /api/v1/proposals/generate
pub async fn handle_generate_proposal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<GenerateProposalRequest>,
) -> Result<(StatusCode, Json<GenerateProposalResponse>), AppError> {
    auth.require_owner(req.user_id)?;
    let user = fetch_user(&state.db, req.user_id).await?;

    let job = sqlx::query_as::<_, JobOpportunityRow>(
        "SELECT * FROM job_opportunities WHERE id = $1",
    )
    .bind(req.job_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Job {} not found", req.job_id)))?;

    let content = generate_proposal(&state.llm, &user, &job).await.into_inner();

    let proposal = sqlx::query_as::<_, ProposalRow>(
        r#"
        INSERT INTO proposals (user_id, job_id, content)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(req.user_id)
    .bind(req.job_id)
    .bind(&content)
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(GenerateProposalResponse {
            message: "Proposal generated successfully".to_string(),
            proposal,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct ProposalListResponse {
    pub proposals: Vec<ProposalRow>,
}

/// GET /api/v1/proposals/:user_id
pub async fn handle_list_proposals(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProposalListResponse>, AppError> {
    auth.require_owner(user_id)?;

    let proposals = sqlx::query_as::<_, ProposalRow>(
        "SELECT * FROM proposals WHERE user_id = $1 ORDER BY sent_at DESC",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ProposalListResponse { proposals }))
}

// ─── Analytics ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub total_earnings: f64,
    pub total_hours: f64,
    pub average_hourly_rate: f64,
    pub active_projects: i64,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub summary: AnalyticsSummary,
    pub pricing_suggestion: PricingSuggestion,
}

/// GET /api/v1/analytics/:user_id
pub async fn handle_analytics(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    auth.require_owner(user_id)?;

    let total_earnings: Option<f64> = sqlx::query_scalar(
        "SELECT SUM(budget) FROM projects WHERE user_id = $1 AND status = 'completed'",
    )
    .bind(user_id)
    .fetch_one(&state.db)
    .await?;
    let total_earnings = total_earnings.unwrap_or(0.0);

    let total_hours: Option<f64> =
        sqlx::query_scalar("SELECT SUM(hours_worked) FROM projects WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&state.db)
            .await?;
    let total_hours = total_hours.unwrap_or(0.0);

    let active_projects: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM projects WHERE user_id = $1 AND status = 'active'",
    )
    .bind(user_id)
    .fetch_one(&state.db)
    .await?;

    let average_hourly_rate = if total_hours > 0.0 {
        total_earnings / total_hours
    } else {
        0.0
    };

    let suggestion = pricing_suggestion(&state.llm, total_earnings, total_hours, average_hourly_rate)
        .await
        .into_inner();

    Ok(Json(AnalyticsResponse {
        summary: AnalyticsSummary {
            total_earnings,
            total_hours,
            average_hourly_rate: (average_hourly_rate * 100.0).round() / 100.0,
            active_projects,
        },
        pricing_suggestion: suggestion,
    }))
}

// ─── Skill gaps ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SkillGapListResponse {
    pub skill_gaps: Vec<SkillGapRow>,
}

/// GET /api/v1/skill-gaps/:user_id
pub async fn handle_list_skill_gaps(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<SkillGapListResponse>, AppError> {
    auth.require_owner(user_id)?;

    let skill_gaps = sqlx::query_as::<_, SkillGapRow>(
        "SELECT * FROM skill_gaps WHERE user_id = $1 ORDER BY priority_score DESC",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(SkillGapListResponse { skill_gaps }))
}

/// POST /api/v1/skill-gaps/analyze/:user_id
///
/// Harvests skills from low-scoring opportunities, asks the capability
/// which gaps matter, and upserts the recommendations.
pub async fn handle_analyze_skill_gaps(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<SkillGapListResponse>, AppError> {
    auth.require_owner(user_id)?;
    let user = fetch_user(&state.db, user_id).await?;

    let missed_skill_lists: Vec<Vec<String>> = sqlx::query_scalar(
        "SELECT required_skills FROM job_opportunities WHERE match_score <= $1",
    )
    .bind(HIGH_MATCH_THRESHOLD)
    .fetch_all(&state.db)
    .await?;
    let missed_skills: Vec<String> = missed_skill_lists.into_iter().flatten().collect();

    let advice = analyze_skill_gaps(&state.llm, &user.skills_list(), &missed_skills)
        .await
        .into_inner();

    for item in advice {
        sqlx::query(
            r#"
            INSERT INTO skill_gaps (user_id, missing_skill, learning_resource, priority_score)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT skill_gaps_user_skill_key DO UPDATE
            SET job_missed_count = skill_gaps.job_missed_count + 1,
                learning_resource = COALESCE(EXCLUDED.learning_resource, skill_gaps.learning_resource),
                priority_score = EXCLUDED.priority_score
            "#,
        )
        .bind(user_id)
        .bind(&item.skill)
        .bind(&item.resource)
        .bind(item.priority)
        .execute(&state.db)
        .await?;
    }

    let skill_gaps = sqlx::query_as::<_, SkillGapRow>(
        "SELECT * FROM skill_gaps WHERE user_id = $1 ORDER BY priority_score DESC",
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(SkillGapListResponse { skill_gaps }))
}

// ─── Client communications ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CommunicationRequest {
    pub user_id: Uuid,
    pub project_id: Option<Uuid>,
    pub message_type: String,
    pub client_message: String,
    #[serde(default)]
    pub context: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct CommunicationResponse {
    pub communication: ClientCommunicationRow,
}

/// POST /api/v1/communications/respond
pub async fn handle_communication(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CommunicationRequest>,
) -> Result<(StatusCode, Json<CommunicationResponse>), AppError> {
    auth.require_owner(req.user_id)?;

    let suggestion = generate_communication_response(
        &state.llm,
        &req.message_type,
        &req.client_message,
        &req.context,
    )
    .await
    .into_inner();

    let communication = sqlx::query_as::<_, ClientCommunicationRow>(
        r#"
        INSERT INTO client_communications
            (user_id, project_id, message_type, client_message, ai_suggestion)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(req.user_id)
    .bind(req.project_id)
    .bind(&req.message_type)
    .bind(&req.client_message)
    .bind(&suggestion)
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommunicationResponse { communication }),
    ))
}
