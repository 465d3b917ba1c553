use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub client_name: Option<String>,
    pub description: Option<String>,
    pub budget: f64,
    pub hours_worked: f64,
    /// active | completed | cancelled
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ProjectRow {
    /// Effective hourly rate; 0 when no hours have been logged yet.
    pub fn hourly_rate(&self) -> f64 {
        if self.hours_worked > 0.0 {
            self.budget / self.hours_worked
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimeLogRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub description: Option<String>,
    pub hours: f64,
    pub date_logged: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(budget: f64, hours_worked: f64) -> ProjectRow {
        ProjectRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Site rebuild".to_string(),
            client_name: None,
            description: None,
            budget,
            hours_worked,
            status: "active".to_string(),
            start_date: Utc::now(),
            end_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_hourly_rate() {
        assert_eq!(project(1000.0, 20.0).hourly_rate(), 50.0);
    }

    #[test]
    fn test_hourly_rate_no_hours_is_zero() {
        assert_eq!(project(1000.0, 0.0).hourly_rate(), 0.0);
    }
}
