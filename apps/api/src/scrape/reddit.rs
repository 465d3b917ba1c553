//! Reddit /r/forhire — JSON feed filtered to [HIRING] posts.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::models::job::{JobCandidate, JobSource};
use crate::scrape::{budget, skills, JobFeed};

const LISTING_URL: &str = "https://www.reddit.com/r/forhire.json?limit=10";
/// Reddit requires a distinct UA; reuse the service identity.
const FEED_USER_AGENT: &str = "lancer/1.0";
const MAX_POSTS: usize = 10;
const HIRING_MARKER: &str = "[hiring]";
const DESCRIPTION_CAP: usize = 300;

pub struct ForHireFeed {
    client: reqwest::Client,
}

impl ForHireFeed {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobFeed for ForHireFeed {
    fn source(&self) -> JobSource {
        JobSource::Reddit
    }

    async fn fetch(&self) -> Result<Vec<JobCandidate>> {
        let response = self
            .client
            .get(LISTING_URL)
            .header(reqwest::header::USER_AGENT, FEED_USER_AGENT)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("unexpected status {}", response.status());
        }
        let body = response.text().await?;
        parse_listing(&body)
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    author: Option<String>,
    permalink: Option<String>,
}

/// Parses the feed body, keeping only posts whose title carries the
/// hiring marker (case-insensitive), capped at `MAX_POSTS`.
fn parse_listing(raw: &str) -> Result<Vec<JobCandidate>> {
    let listing: Listing = serde_json::from_str(raw)?;

    let jobs = listing
        .data
        .children
        .into_iter()
        .map(|post| post.data)
        .filter(|post| post.title.to_ascii_lowercase().contains(HIRING_MARKER))
        .take(MAX_POSTS)
        .map(|post| JobCandidate {
            description: post.selftext.chars().take(DESCRIPTION_CAP).collect(),
            required_skills: skills::extract_skills(&post.title),
            budget: budget::extract_budget(&post.selftext),
            source: JobSource::Reddit,
            client_name: Some(
                post.author
                    .clone()
                    .unwrap_or_else(|| "Reddit User".to_string()),
            ),
            url: post
                .permalink
                .as_deref()
                .map(|p| format!("https://reddit.com{p}")),
            title: strip_marker(&post.title),
        })
        .collect();

    Ok(jobs)
}

/// Removes the first hiring marker occurrence, case-insensitively.
/// ASCII lowercasing preserves byte offsets, so the index is safe to reuse.
fn strip_marker(title: &str) -> String {
    match title.to_ascii_lowercase().find(HIRING_MARKER) {
        Some(idx) => {
            let mut cleaned = String::with_capacity(title.len());
            cleaned.push_str(&title[..idx]);
            cleaned.push_str(&title[idx + HIRING_MARKER.len()..]);
            cleaned.trim().to_string()
        }
        None => title.trim().to_string(),
    }
}
