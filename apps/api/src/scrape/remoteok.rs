//! RemoteOK — tabular HTML listing of remote freelance jobs.

use anyhow::{bail, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::models::job::{JobCandidate, JobSource};
use crate::scrape::{element_text, skills, JobFeed};

const LISTING_URL: &str = "https://remoteok.io/remote-freelance-jobs";
const MAX_JOBS: usize = 10;

pub struct RemoteOkFeed {
    client: reqwest::Client,
}

impl RemoteOkFeed {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobFeed for RemoteOkFeed {
    fn source(&self) -> JobSource {
        JobSource::Remoteok
    }

    async fn fetch(&self) -> Result<Vec<JobCandidate>> {
        let response = self.client.get(LISTING_URL).send().await?;
        if !response.status().is_success() {
            bail!("unexpected status {}", response.status());
        }
        let body = response.text().await?;
        Ok(parse_listing(&body))
    }
}

/// Parses the listing table. Rows missing a title or company are skipped;
/// at most `MAX_JOBS` rows are considered.
fn parse_listing(html: &str) -> Vec<JobCandidate> {
    let document = Html::parse_document(html);
    let row_sel = Selector::parse("tr.job").expect("static selector parses");
    let title_sel = Selector::parse("h2.title").expect("static selector parses");
    let company_sel = Selector::parse("h3.company").expect("static selector parses");

    let mut jobs = Vec::new();
    for row in document.select(&row_sel).take(MAX_JOBS) {
        let title = match row.select(&title_sel).next().map(element_text) {
            Some(t) if !t.is_empty() => t,
            _ => continue,
        };
        let company = match row.select(&company_sel).next().map(element_text) {
            Some(c) if !c.is_empty() => c,
            _ => continue,
        };

        let url = row
            .value()
            .attr("data-href")
            .map(|href| format!("https://remoteok.io{href}"));

        jobs.push(JobCandidate {
            description: format!("Remote freelance position at {company}"),
            required_skills: skills::extract_skills(&title),
            budget: None,
            source: JobSource::Remoteok,
            client_name: Some(company),
            url,
            title,
        });
    }
    jobs
}
