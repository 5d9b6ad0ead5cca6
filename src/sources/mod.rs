//! JobSource adapters - one per platform
//!
//! Contract: `fetch(max_items)` returns whatever the adapter managed to
//! collect, possibly empty, and never propagates a network/parse fault
//! to the caller. Ordering is site-native listing order truncated to
//! `max_items`. Dedup against the ledger is the orchestrator's job.
//!
//! Listing pages are fetched with `reqwest` and parsed with `scraper`
//! CSS selectors; parsing is synchronous so no document is held across
//! an await point.

pub mod internshala;
pub mod jobright;
pub mod linkedin;
pub mod wellfound;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::models::{JobSite, Posting};

pub use internshala::InternshalaSource;
pub use jobright::JobrightSource;
pub use linkedin::LinkedInSource;
pub use wellfound::WellfoundSource;

/// One platform's listing feed.
#[async_trait]
pub trait JobSource: Send + Sync {
    fn site(&self) -> JobSite;

    /// Never fails; degraded fetches return what was collected so far.
    async fn fetch(&self, max_items: usize) -> Vec<Posting>;
}

/// Shared HTTP client for all adapters.
///
/// Job boards reject obvious bot agents, so a browser-like User-Agent is
/// mandatory.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0")
        .timeout(Duration::from_secs(10))
        .build()
        .context("failed to build HTTP client")
}

/// GET a listing page and return its body, erroring on non-2xx.
pub(crate) async fn fetch_html(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?
        .error_for_status()
        .with_context(|| format!("bad status from {}", url))?;

    response.text().await.context("failed to read response body")
}

/// Resolve a possibly-relative href against a platform base URL.
pub(crate) fn resolve_link(base: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        href.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_links_gain_the_platform_base() {
        assert_eq!(
            resolve_link("https://internshala.com", "/internship/detail/x"),
            "https://internshala.com/internship/detail/x"
        );
    }

    #[test]
    fn absolute_links_pass_through() {
        assert_eq!(
            resolve_link("https://internshala.com", "https://other.example/x"),
            "https://other.example/x"
        );
    }
}
