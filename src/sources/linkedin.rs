//! LinkedIn listing adapter (best-effort, unauthenticated search page)

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::models::{JobSite, Posting};
use crate::sources::{fetch_html, JobSource};

pub struct LinkedInSource {
    client: reqwest::Client,
    search_url: String,
}

impl LinkedInSource {
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
impl JobSource for LinkedInSource {
    fn site(&self) -> JobSite {
        JobSite::LinkedIn
    }

    async fn fetch(&self, max_items: usize) -> Vec<Posting> {
        info!("🔍 Fetching LinkedIn (best-effort)...");
        match self.fetch_inner(max_items).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("LinkedIn fetch error: {}", e);
                Vec::new()
            }
        }
    }
}

fn parse_listing(html: &str, max_items: usize) -> Vec<Posting> {
    let Ok(card_sel) = Selector::parse("a.base-card__full-link, a.result-card__full-card-link")
    else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&card_sel)
        .take(max_items)
        .map(|a| Posting {
            site: JobSite::LinkedIn,
            title: a.text().collect::<String>().trim().to_string(),
            company: "LinkedIn".to_string(),
            link: a.value().attr("href").map(str::to_string),
            location: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_link_cards() {
        let html = r#"
            <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/1">
                ML Engineering Intern
            </a>
            <a class="result-card__full-card-link" href="https://www.linkedin.com/jobs/view/2">
                AI Research Intern
            </a>
        "#;
        let jobs = parse_listing(html, 20);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "ML Engineering Intern");
        assert_eq!(
            jobs[0].link.as_deref(),
            Some("https://www.linkedin.com/jobs/view/1")
        );
        assert_eq!(jobs[1].site, JobSite::LinkedIn);
    }

    #[test]
    fn anchor_without_href_keeps_posting_without_link() {
        let html = r#"<a class="base-card__full-link">Orphan card</a>"#;
        let jobs = parse_listing(html, 20);
        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].link.is_none());
    }
}
