//! Job ingestion — the scrape → dedupe → score → persist → filter pipeline.
//!
//! Strictly sequential, single pass, no retry. Scrape and scoring failures
//! degrade to partial or zero results; only store failures propagate, and
//! they abort the whole attempt with nothing committed.

pub mod handlers;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info};

use crate::matching::MatchScorer;
use crate::models::job::{JobCandidate, JobOpportunityRow, JobSource};
use crate::scrape::JobScraper;

/// Opportunities scoring strictly above this are returned in the immediate
/// search response; everything surviving dedupe is persisted regardless.
pub const HIGH_MATCH_THRESHOLD: f64 = 50.0;

/// Field set for a new opportunity; the store assigns id and created_at.
#[derive(Debug, Clone)]
pub struct NewOpportunity {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub budget: Option<f64>,
    pub source: JobSource,
    pub source_url: Option<String>,
    pub client_name: Option<String>,
    pub match_score: f64,
}

impl NewOpportunity {
    pub fn from_candidate(candidate: JobCandidate, match_score: f64) -> Self {
        Self {
            title: candidate.title,
            description: candidate.description,
            required_skills: candidate.required_skills,
            budget: candidate.budget,
            source: candidate.source,
            source_url: candidate.url,
            client_name: candidate.client_name,
            match_score,
        }
    }
}

/// The persisted opportunity store as the pipeline consumes it: lookup by
/// natural key, insert, one transactional commit. The Postgres
/// implementation wraps a single transaction; tests substitute an
/// in-memory double.
#[async_trait]
pub trait OpportunityStore: Send {
    async fn find_by_title_and_source(
        &mut self,
        title: &str,
        source: JobSource,
    ) -> Result<Option<JobOpportunityRow>>;

    /// Inserts a new opportunity and returns the persisted row, or `None`
    /// when a concurrent writer already holds the (title, source) key.
    async fn insert(&mut self, new: NewOpportunity) -> Result<Option<JobOpportunityRow>>;

    /// Commits everything inserted during this pipeline run. Dropping the
    /// store without committing rolls the batch back.
    async fn commit(&mut self) -> Result<()>;
}

/// Transaction-backed store. The (title, source) UNIQUE constraint in the
/// schema makes the insert race-safe under concurrent ingestions; the
/// application-level lookup only saves pointless scoring calls.
pub struct PgOpportunityStore<'a> {
    tx: Option<Transaction<'a, Postgres>>,
}

impl<'a> PgOpportunityStore<'a> {
    pub async fn begin(pool: &'a PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tx: Some(pool.begin().await?),
        })
    }

    fn tx(&mut self) -> Result<&mut Transaction<'a, Postgres>> {
        self.tx.as_mut().context("opportunity store already committed")
    }
}

#[async_trait]
impl OpportunityStore for PgOpportunityStore<'_> {
    async fn find_by_title_and_source(
        &mut self,
        title: &str,
        source: JobSource,
    ) -> Result<Option<JobOpportunityRow>> {
        let row = sqlx::query_as::<_, JobOpportunityRow>(
            "SELECT * FROM job_opportunities WHERE title = $1 AND source = $2",
        )
        .bind(title)
        .bind(source)
        .fetch_optional(&mut **self.tx()?)
        .await?;
        Ok(row)
    }

    async fn insert(&mut self, new: NewOpportunity) -> Result<Option<JobOpportunityRow>> {
        let row = sqlx::query_as::<_, JobOpportunityRow>(
            r#"
            INSERT INTO job_opportunities
                (title, description, required_skills, budget, source,
                 source_url, client_name, match_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT ON CONSTRAINT job_opportunities_title_source_key DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.required_skills)
        .bind(new.budget)
        .bind(new.source)
        .bind(&new.source_url)
        .bind(&new.client_name)
        .bind(new.match_score)
        .fetch_optional(&mut **self.tx()?)
        .await?;
        Ok(row)
    }

    async fn commit(&mut self) -> Result<()> {
        let tx = self
            .tx
            .take()
            .context("opportunity store already committed")?;
        tx.commit().await?;
        Ok(())
    }
}

/// What one ingestion run produced.
#[derive(Debug, Serialize)]
pub struct IngestionOutcome {
    pub total_found: usize,
    pub high_match: Vec<JobOpportunityRow>,
}

/// Runs one full ingestion cycle for a user's skill list.
pub async fn run_job_search(
    store: &mut dyn OpportunityStore,
    scraper: &dyn JobScraper,
    scorer: &dyn MatchScorer,
    user_skills: &[String],
) -> Result<IngestionOutcome> {
    let candidates = scraper.scrape_jobs().await;
    let total_found = candidates.len();
    info!("scrape cycle produced {total_found} candidates");

    let mut high_match = Vec::new();
    let mut inserted = 0usize;

    for candidate in candidates {
        // A (title, source) hit discards the candidate: no update, no re-score.
        if store
            .find_by_title_and_source(&candidate.title, candidate.source)
            .await?
            .is_some()
        {
            debug!(
                "duplicate candidate discarded: {} ({})",
                candidate.title, candidate.source
            );
            continue;
        }

        let score = scorer
            .calculate_job_match(user_skills, &candidate.required_skills, &candidate.description)
            .await;

        let Some(row) = store
            .insert(NewOpportunity::from_candidate(candidate, score))
            .await?
        else {
            // Lost the natural-key race to a concurrent writer.
            continue;
        };
        inserted += 1;

        if row.match_score > HIGH_MATCH_THRESHOLD {
            high_match.push(row);
        }
    }

    store.commit().await?;
    info!(
        "persisted {inserted} new opportunities, {} high-match",
        high_match.len()
    );

    Ok(IngestionOutcome {
        total_found,
        high_match,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// In-memory stand-in for the transactional store.
    #[derive(Default)]
    struct MemoryStore {
        rows: Vec<JobOpportunityRow>,
        committed: bool,
        fail_commit: bool,
    }

    impl MemoryStore {
        fn seeded(titles: &[(&str, JobSource)]) -> Self {
            let mut store = Self::default();
            for (title, source) in titles {
                store.rows.push(make_row(title, *source, 0.0));
            }
            store
        }
    }

    fn make_row(title: &str, source: JobSource, match_score: f64) -> JobOpportunityRow {
        JobOpportunityRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            required_skills: vec!["General".to_string()],
            budget: None,
            source,
            source_url: None,
            client_name: None,
            match_score,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[async_trait]
    impl OpportunityStore for MemoryStore {
        async fn find_by_title_and_source(
            &mut self,
            title: &str,
            source: JobSource,
        ) -> Result<Option<JobOpportunityRow>> {
            Ok(self
                .rows
                .iter()
                .find(|r| r.title == title && r.source == source)
                .cloned())
        }

        async fn insert(&mut self, new: NewOpportunity) -> Result<Option<JobOpportunityRow>> {
            if self
                .rows
                .iter()
                .any(|r| r.title == new.title && r.source == new.source)
            {
                return Ok(None);
            }
            let row = JobOpportunityRow {
                id: Uuid::new_v4(),
                title: new.title,
                description: new.description,
                required_skills: new.required_skills,
                budget: new.budget,
                source: new.source,
                source_url: new.source_url,
                client_name: new.client_name,
                match_score: new.match_score,
                is_active: true,
                created_at: Utc::now(),
            };
            self.rows.push(row.clone());
            Ok(Some(row))
        }

        async fn commit(&mut self) -> Result<()> {
            if self.fail_commit {
                bail!("deadlock detected");
            }
            self.committed = true;
            Ok(())
        }
    }

    struct StubScraper(Vec<JobCandidate>);

    #[async_trait]
    impl JobScraper for StubScraper {
        async fn scrape_jobs(&self) -> Vec<JobCandidate> {
            self.0.clone()
        }
    }

    /// Scores every candidate with a fixed value and counts invocations.
    struct StubScorer {
        score: f64,
        calls: AtomicUsize,
    }

    impl StubScorer {
        fn new(score: f64) -> Self {
            Self {
                score,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MatchScorer for StubScorer {
        async fn calculate_job_match(
            &self,
            _user_skills: &[String],
            _job_skills: &[String],
            _description: &str,
        ) -> f64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.score
        }
    }

    fn candidate(title: &str, source: JobSource, skill: &str) -> JobCandidate {
        JobCandidate {
            title: title.to_string(),
            description: format!("{title} description"),
            required_skills: vec![skill.to_string()],
            budget: None,
            source,
            client_name: None,
            url: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_is_discarded_without_rescoring() {
        let mut store = MemoryStore::seeded(&[("Build API", JobSource::Remoteok)]);
        let scraper = StubScraper(vec![candidate("Build API", JobSource::Remoteok, "Python")]);
        let scorer = StubScorer::new(90.0);

        let outcome = run_job_search(&mut store, &scraper, &scorer, &[])
            .await
            .unwrap();

        assert_eq!(outcome.total_found, 1);
        assert!(outcome.high_match.is_empty());
        assert_eq!(store.rows.len(), 1, "no second row for the duplicate");
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0, "duplicate not re-scored");
    }

    #[tokio::test]
    async fn test_same_title_different_source_is_not_a_duplicate() {
        let mut store = MemoryStore::seeded(&[("Build API", JobSource::Remoteok)]);
        let scraper = StubScraper(vec![candidate("Build API", JobSource::Reddit, "Python")]);
        let scorer = StubScorer::new(10.0);

        run_job_search(&mut store, &scraper, &scorer, &[])
            .await
            .unwrap();

        assert_eq!(store.rows.len(), 2);
    }

    #[tokio::test]
    async fn test_score_exactly_50_is_persisted_but_not_high_match() {
        let mut store = MemoryStore::default();
        let scraper = StubScraper(vec![candidate("CSS fixes", JobSource::Reddit, "CSS")]);
        let scorer = StubScorer::new(50.0);

        let outcome = run_job_search(&mut store, &scraper, &scorer, &[])
            .await
            .unwrap();

        assert!(outcome.high_match.is_empty());
        assert_eq!(store.rows.len(), 1);
        assert_eq!(store.rows[0].match_score, 50.0);
    }

    #[tokio::test]
    async fn test_score_51_is_high_match() {
        let mut store = MemoryStore::default();
        let scraper = StubScraper(vec![candidate("CSS fixes", JobSource::Reddit, "CSS")]);
        let scorer = StubScorer::new(51.0);

        let outcome = run_job_search(&mut store, &scraper, &scorer, &[])
            .await
            .unwrap();

        assert_eq!(outcome.high_match.len(), 1);
        assert_eq!(store.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_end_to_end_one_duplicate_one_new() {
        let mut store = MemoryStore::seeded(&[("Old gig", JobSource::Remoteok)]);
        let scraper = StubScraper(vec![
            candidate("Old gig", JobSource::Remoteok, "General"),
            candidate("Python ETL pipeline", JobSource::Reddit, "Python"),
        ]);
        let scorer = StubScorer::new(72.0);
        let user_skills = vec!["Python".to_string(), "React".to_string()];

        let outcome = run_job_search(&mut store, &scraper, &scorer, &user_skills)
            .await
            .unwrap();

        assert_eq!(outcome.total_found, 2);
        assert_eq!(outcome.high_match.len(), 1);
        assert_eq!(outcome.high_match[0].title, "Python ETL pipeline");
        assert_eq!(outcome.high_match[0].match_score, 72.0);
        assert_eq!(store.rows.len(), 2, "exactly one new row committed");
        assert!(store.committed);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_commit_failure_propagates() {
        let mut store = MemoryStore {
            fail_commit: true,
            ..MemoryStore::default()
        };
        let scraper = StubScraper(vec![candidate("AI chatbot", JobSource::Reddit, "AI")]);
        let scorer = StubScorer::new(80.0);

        let result = run_job_search(&mut store, &scraper, &scorer, &[]).await;
        assert!(result.is_err());
        assert!(!store.committed);
    }

    #[tokio::test]
    async fn test_empty_scrape_commits_empty_outcome() {
        let mut store = MemoryStore::default();
        let scraper = StubScraper(vec![]);
        let scorer = StubScorer::new(99.0);

        let outcome = run_job_search(&mut store, &scraper, &scorer, &[])
            .await
            .unwrap();

        assert_eq!(outcome.total_found, 0);
        assert!(outcome.high_match.is_empty());
        assert!(store.committed);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);
    }
}
