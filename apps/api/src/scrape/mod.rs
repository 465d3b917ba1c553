//! Job scraping — three best-effort source fetchers behind one aggregator.
//!
//! Each feed issues a single GET with a fixed User-Agent and a 10s timeout,
//! parses a capped number of elements, and skips malformed elements
//! individually. The aggregator isolates feed failures: one source going
//! dark never costs the others their results.

pub mod budget;
pub mod reddit;
pub mod remoteok;
pub mod skills;
pub mod weworkremotely;

use std::ops::Range;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use scraper::ElementRef;
use tracing::{debug, warn};

use crate::models::job::{JobCandidate, JobSource};
use crate::scrape::reddit::ForHireFeed;
use crate::scrape::remoteok::RemoteOkFeed;
use crate::scrape::weworkremotely::WeWorkRemotelyFeed;

/// Browser-like User-Agent sent with scrape requests.
pub const SCRAPE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the HTTP client shared by all source fetchers.
pub fn build_scrape_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(SCRAPE_USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
}

/// One external job source: an origin tag plus a best-effort fetch.
#[async_trait]
pub trait JobFeed: Send + Sync {
    fn source(&self) -> JobSource;
    async fn fetch(&self) -> Result<Vec<JobCandidate>>;
}

/// The scraping capability the ingestion pipeline depends on.
/// Swapped for stub feeds in tests.
#[async_trait]
pub trait JobScraper: Send + Sync {
    async fn scrape_jobs(&self) -> Vec<JobCandidate>;
}

/// Sequential fan-out over all configured feeds.
pub struct ScrapeAggregator {
    feeds: Vec<Box<dyn JobFeed>>,
    /// Pause bounds in seconds, drawn uniformly once per aggregation call.
    pause_secs: Range<f64>,
}

impl ScrapeAggregator {
    pub fn new(feeds: Vec<Box<dyn JobFeed>>) -> Self {
        Self {
            feeds,
            pause_secs: 1.0..3.0,
        }
    }

    /// All three production feeds over one shared client.
    pub fn with_default_feeds(client: reqwest::Client) -> Self {
        Self::new(vec![
            Box::new(RemoteOkFeed::new(client.clone())),
            Box::new(WeWorkRemotelyFeed::new(client.clone())),
            Box::new(ForHireFeed::new(client)),
        ])
    }

    /// Overrides the randomized pause, mainly so tests run without sleeping.
    pub fn with_pause(mut self, pause_secs: Range<f64>) -> Self {
        self.pause_secs = pause_secs;
        self
    }

    fn draw_pause(&self) -> Duration {
        let secs = if self.pause_secs.is_empty() {
            self.pause_secs.start
        } else {
            rand::thread_rng().gen_range(self.pause_secs.clone())
        };
        Duration::from_secs_f64(secs.max(0.0))
    }
}

#[async_trait]
impl JobScraper for ScrapeAggregator {
    async fn scrape_jobs(&self) -> Vec<JobCandidate> {
        // One randomized pause per aggregation call to reduce burstiness.
        let pause = self.draw_pause();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let mut all_jobs = Vec::new();
        for feed in &self.feeds {
            match feed.fetch().await {
                Ok(jobs) => {
                    debug!("{}: {} candidates", feed.source(), jobs.len());
                    all_jobs.extend(jobs);
                }
                // A failing source yields nothing; the others still run.
                Err(e) => warn!("{} scraping error: {e}", feed.source()),
            }
        }
        all_jobs
    }
}

/// Collects an element's text nodes into one trimmed, space-joined string.
pub(crate) fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
