use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub full_name: String,
    /// Comma-joined skill tags, parsed on demand via `skills_list`.
    pub skills: String,
    pub experience_level: String,
    pub hourly_rate: f64,
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Parses the skills column into individual tags. Whitespace is trimmed
    /// and an empty column yields an empty list.
    pub fn skills_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}
