use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::MatchScorer;
use crate::scrape::JobScraper;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Pluggable scrape capability. Production: `ScrapeAggregator` over the
    /// three live feeds; tests substitute stub feeds.
    pub scraper: Arc<dyn JobScraper>,
    /// Pluggable match scorer over the external text capability.
    pub scorer: Arc<dyn MatchScorer>,
    pub config: Config,
}
