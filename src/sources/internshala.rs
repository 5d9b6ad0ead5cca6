//! Internshala listing adapter

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::models::{JobSite, Posting};
use crate::sources::{fetch_html, resolve_link, JobSource};

const BASE_URL: &str = "https://internshala.com";

pub struct InternshalaSource {
    client: reqwest::Client,
    search_url: String,
}

impl InternshalaSource {
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
impl JobSource for InternshalaSource {
    fn site(&self) -> JobSite {
        JobSite::Internshala
    }

    async fn fetch(&self, max_items: usize) -> Vec<Posting> {
        info!("🔍 Fetching Internshala...");
        match self.fetch_inner(max_items).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Internshala fetch error: {}", e);
                Vec::new()
            }
        }
    }
}

/// Card markup changes regularly; both known card classes are tried and
/// title/company fall back to generic selectors.
fn parse_listing(html: &str, max_items: usize) -> Vec<Posting> {
    let mut jobs = Vec::new();

    let Ok(primary_cards) = Selector::parse(".individual_internship") else {
        return jobs;
    };
    let Ok(fallback_cards) = Selector::parse(".internship_meta") else {
        return jobs;
    };
    let (Ok(title_sel), Ok(company_sel), Ok(link_sel)) = (
        Selector::parse(".job-internship-name, h3"),
        Selector::parse(".link_display_like_text, .company_name"),
        Selector::parse("a"),
    ) else {
        return jobs;
    };

    let document = Html::parse_document(html);
    let mut cards: Vec<_> = document.select(&primary_cards).collect();
    if cards.is_empty() {
        cards = document.select(&fallback_cards).collect();
    }

    for card in cards.into_iter().take(max_items) {
        let title = card
            .select(&title_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());
        let company = card
            .select(&company_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let link = card
            .select(&link_sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(|href| resolve_link(BASE_URL, href));

        jobs.push(Posting {
            site: JobSite::Internshala,
            title,
            company,
            link,
            location: None,
        });
    }

    jobs
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <html><body>
          <div class="individual_internship">
            <h3 class="job-internship-name">Machine Learning Intern</h3>
            <div class="link_display_like_text">Acme Robotics</div>
            <a href="/internship/detail/ml-intern-123">view</a>
          </div>
          <div class="individual_internship">
            <h3 class="job-internship-name">Data Science Intern</h3>
            <div class="link_display_like_text">DataWorks</div>
            <a href="/internship/detail/ds-intern-456">view</a>
          </div>
        </body></html>
    "#;

    #[test]
    fn parses_cards_with_resolved_links() {
        let jobs = parse_listing(FIXTURE, 20);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Machine Learning Intern");
        assert_eq!(jobs[0].company, "Acme Robotics");
        assert_eq!(
            jobs[0].link.as_deref(),
            Some("https://internshala.com/internship/detail/ml-intern-123")
        );
        assert_eq!(jobs[0].site, JobSite::Internshala);
    }

    #[test]
    fn truncates_to_max_items() {
        let jobs = parse_listing(FIXTURE, 1);
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let html = r#"<div class="individual_internship"><a href="/x">view</a></div>"#;
        let jobs = parse_listing(html, 20);
        assert_eq!(jobs[0].title, "Untitled");
        assert_eq!(jobs[0].company, "Unknown");
    }

    #[test]
    fn empty_page_yields_no_jobs() {
        assert!(parse_listing("<html><body></body></html>", 20).is_empty());
    }
}
