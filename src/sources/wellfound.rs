//! Wellfound (AngelList) listing adapter

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::models::{JobSite, Posting};
use crate::sources::{fetch_html, resolve_link, JobSource};

const BASE_URL: &str = "https://wellfound.com";

pub struct WellfoundSource {
    client: reqwest::Client,
    search_url: String,
}

impl WellfoundSource {
    pub fn new(client: reqwest::Client, search_url: impl Into<String>) -> Self {
        Self {
            client,
            search_url: search_url.into(),
        }
    }

    async fn fetch_inner(&self, max_items: usize) -> anyhow::Result<Vec<Posting>> {
        let html = fetch_html(&self.client, &self.search_url).await?;
        Ok(parse_listing(&html, max_items))
    }
}

#[async_trait]
impl JobSource for WellfoundSource {
    fn site(&self) -> JobSite {
        JobSite::Wellfound
    }

    async fn fetch(&self, max_items: usize) -> Vec<Posting> {
        info!("🔍 Fetching Wellfound...");
        match self.fetch_inner(max_items).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Wellfound fetch error: {}", e);
                Vec::new()
            }
        }
    }
}

fn parse_listing(html: &str, max_items: usize) -> Vec<Posting> {
    let Ok(card_sel) = Selector::parse("a[data-test='job-link'], a.job-link") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&card_sel)
        .take(max_items)
        .map(|a| Posting {
            site: JobSite::Wellfound,
            title: a.text().collect::<String>().trim().to_string(),
            company: "Wellfound".to_string(),
            link: a
                .value()
                .attr("href")
                .map(|href| resolve_link(BASE_URL, href)),
            location: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_job_links_with_base_resolution() {
        let html = r#"
            <a data-test="job-link" href="/jobs/ml-intern-1">Machine Learning Intern</a>
            <a class="job-link" href="/jobs/cv-intern-2">Computer Vision Intern</a>
        "#;
        let jobs = parse_listing(html, 20);
        assert_eq!(jobs.len(), 2);
        assert_eq!(
            jobs[0].link.as_deref(),
            Some("https://wellfound.com/jobs/ml-intern-1")
        );
        assert_eq!(jobs[1].title, "Computer Vision Intern");
        assert_eq!(jobs[0].company, "Wellfound");
    }

    #[test]
    fn unrelated_anchors_are_ignored() {
        let html = r#"<a href="/about">About us</a>"#;
        assert!(parse_listing(html, 20).is_empty());
    }
}
