use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProposalRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub content: String,
    /// sent | accepted | rejected
    pub status: String,
    pub sent_at: DateTime<Utc>,
}
