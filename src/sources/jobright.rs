//! Jobright listing adapter

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::models::{JobSite, Posting};
use crate::sources::{fetch_html, resolve_link, JobSource};

const BASE_URL: &str = "https://www.jobright.ai";

pub struct JobrightSource {
    client: reqwest::Client,
    search_url: String,
}

impl JobrightSource {
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
impl JobSource for JobrightSource {
    fn site(&self) -> JobSite {
        JobSite::Jobright
    }

    async fn fetch(&self, max_items: usize) -> Vec<Posting> {
        info!("🔍 Fetching Jobright...");
        match self.fetch_inner(max_items).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Jobright fetch error: {}", e);
                Vec::new()
            }
        }
    }
}

fn parse_listing(html: &str, max_items: usize) -> Vec<Posting> {
    let Ok(card_sel) = Selector::parse("a.job-card, .job-listing a") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&card_sel)
        .take(max_items)
        .map(|a| Posting {
            site: JobSite::Jobright,
            title: a.text().collect::<String>().trim().to_string(),
            company: "Jobright".to_string(),
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
    fn parses_cards_under_both_selectors() {
        let html = r#"
            <a class="job-card" href="/jobs/info/ml-1">ML Intern</a>
            <div class="job-listing"><a href="https://example.com/job/2">Intern, AI</a></div>
        "#;
        let jobs = parse_listing(html, 20);
        assert_eq!(jobs.len(), 2);
        assert_eq!(
            jobs[0].link.as_deref(),
            Some("https://www.jobright.ai/jobs/info/ml-1")
        );
        assert_eq!(jobs[1].link.as_deref(), Some("https://example.com/job/2"));
    }
}
