//! We Work Remotely — HTML list of featured remote jobs.

use anyhow::{bail, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::models::job::{JobCandidate, JobSource};
use crate::scrape::{element_text, skills, JobFeed};

const SEARCH_URL: &str = "https://weworkremotely.com/remote-jobs/search?term=freelance";
const MAX_JOBS: usize = 5;

pub struct WeWorkRemotelyFeed {
    client: reqwest::Client,
}

impl WeWorkRemotelyFeed {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobFeed for WeWorkRemotelyFeed {
    fn source(&self) -> JobSource {
        JobSource::Weworkremotely
    }

    async fn fetch(&self) -> Result<Vec<JobCandidate>> {
        let response = self.client.get(SEARCH_URL).send().await?;
        if !response.status().is_success() {
            bail!("unexpected status {}", response.status());
        }
        let body = response.text().await?;
        Ok(parse_listing(&body))
    }
}

/// Parses featured list items. Items missing a title or company are
/// skipped; at most `MAX_JOBS` items are considered.
fn parse_listing(html: &str) -> Vec<JobCandidate> {
    let document = Html::parse_document(html);
    let item_sel = Selector::parse("li.feature").expect("static selector parses");
    let title_sel = Selector::parse("span.title").expect("static selector parses");
    let company_sel = Selector::parse("span.company").expect("static selector parses");
    let anchor_sel = Selector::parse("a").expect("static selector parses");

    let mut jobs = Vec::new();
    for item in document.select(&item_sel).take(MAX_JOBS) {
        let title = match item.select(&title_sel).next().map(element_text) {
            Some(t) if !t.is_empty() => t,
            _ => continue,
        };
        let company = match item.select(&company_sel).next().map(element_text) {
            Some(c) if !c.is_empty() => c,
            _ => continue,
        };

        let url = item
            .select(&anchor_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| format!("https://weworkremotely.com{href}"));

        jobs.push(JobCandidate {
            description: format!("Remote opportunity with {company}"),
            required_skills: skills::extract_skills(&title),
            budget: None,
            source: JobSource::Weworkremotely,
            client_name: Some(company),
            url,
            title,
        });
    }
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_item(title: &str, company: &str, href: &str) -> String {
        format!(
            r#"<li class="feature">
                 <a href="{href}">
                   <span class="company">{company}</span>
                   <span class="title">{title}</span>
                 </a>
               </li>"#
        )
    }

    fn listing(items: &[String]) -> String {
        format!("<html><body><ul>{}</ul></body></html>", items.join("\n"))
    }

    #[test]
    fn test_parses_items_into_candidates() {
        let html = listing(&[feature_item(
            "WordPress Maintenance",
            "Hooli",
            "/remote-jobs/hooli-wordpress",
        )]);

        let jobs = parse_listing(&html);
        assert_eq!(jobs.len(), 1);

        let job = &jobs[0];
        assert_eq!(job.title, "WordPress Maintenance");
        assert_eq!(job.description, "Remote opportunity with Hooli");
        assert_eq!(job.required_skills, vec!["WordPress"]);
        assert_eq!(
            job.url.as_deref(),
            Some("https://weworkremotely.com/remote-jobs/hooli-wordpress")
        );
        assert_eq!(job.source, JobSource::Weworkremotely);
    }

    #[test]
    fn test_item_missing_title_is_skipped() {
        let html = listing(&[
            r#"<li class="feature"><span class="company">Hooli</span></li>"#.to_string(),
            feature_item("Figma design system", "Initech", "/remote-jobs/x"),
        ]);

        let jobs = parse_listing(&html);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Figma design system");
    }

    #[test]
    fn test_caps_at_five_items() {
        let items: Vec<String> = (0..8)
            .map(|i| feature_item(&format!("Listing {i}"), "Acme", "/j"))
            .collect();

        assert_eq!(parse_listing(&listing(&items)).len(), 5);
    }

    #[test]
    fn test_item_without_anchor_has_no_url() {
        let html = listing(&[r#"<li class="feature">
                <span class="title">CSS cleanup</span>
                <span class="company">Acme</span>
            </li>"#
            .to_string()]);

        let jobs = parse_listing(&html);
        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].url.is_none());
    }
}
