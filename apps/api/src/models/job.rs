use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Fixed enumeration of scrape origins. Stored in Postgres as the
/// `job_source` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "job_source", rename_all = "lowercase")]
pub enum JobSource {
    Remoteok,
    Weworkremotely,
    Reddit,
}

impl JobSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::Remoteok => "remoteok",
            JobSource::Weworkremotely => "weworkremotely",
            JobSource::Reddit => "reddit",
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unpersisted job record produced by a source fetcher. Lives for one
/// scrape cycle, then is either mapped to a `JobOpportunityRow` or dropped
/// as a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCandidate {
    pub title: String,
    pub description: String,
    /// Never empty — skill extraction falls back to the "General" sentinel tag.
    pub required_skills: Vec<String>,
    pub budget: Option<f64>,
    pub source: JobSource,
    pub client_name: Option<String>,
    pub url: Option<String>,
}

/// A persisted, scored opportunity. Immutable after insert except for
/// `is_active` and `match_score`; identity is the (title, source) natural key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobOpportunityRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub budget: Option<f64>,
    pub source: JobSource,
    pub source_url: Option<String>,
    pub client_name: Option<String>,
    pub match_score: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&JobSource::Weworkremotely).unwrap(),
            "\"weworkremotely\""
        );
    }

    #[test]
    fn test_source_display_matches_as_str() {
        for source in [JobSource::Remoteok, JobSource::Weworkremotely, JobSource::Reddit] {
            assert_eq!(source.to_string(), source.as_str());
        }
    }
}
