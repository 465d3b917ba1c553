use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientCommunicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Option<Uuid>,
    /// proposal | negotiation | update | ...
    pub message_type: String,
    pub client_message: Option<String>,
    pub ai_suggestion: String,
    pub user_response: Option<String>,
    pub created_at: DateTime<Utc>,
}
