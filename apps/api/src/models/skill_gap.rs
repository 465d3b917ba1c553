use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillGapRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub missing_skill: String,
    pub job_missed_count: i32,
    pub learning_resource: Option<String>,
    pub priority_score: f64,
    /// identified | learning | acquired
    pub status: String,
    pub created_at: DateTime<Utc>,
}
