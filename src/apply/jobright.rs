//! Jobright apply driver
//!
//! Single-click flow; "Apply on company site" counts as a submission
//! hand-off even though it navigates away.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::apply::{ApplyDriver, ApplyOutcome};
use crate::config::{Config, Credentials};
use crate::infrastructure::{BrowserSession, PageDriver};
use crate::models::JobSite;

pub struct JobrightApply {
    apply_wait: Duration,
}

impl JobrightApply {
    pub fn new(config: &Config) -> Self {
        Self {
            apply_wait: Duration::from_secs(config.apply_wait_secs),
        }
    }

    async fn attempt(&self, driver: &PageDriver, job_url: &str) -> Result<ApplyOutcome> {
        driver.goto(job_url).await?;
        sleep(Duration::from_secs(3)).await;

        info!("🔎 Checking for Apply link on Jobright...");
        if driver
            .click_control_within(
                &["Apply", "Apply now", "Apply on company site"],
                self.apply_wait,
            )
            .await?
            .is_some()
        {
            sleep(Duration::from_secs(3)).await;
            Ok(ApplyOutcome::submitted("Clicked apply"))
        } else {
            Ok(ApplyOutcome::not_submitted("Apply button not found"))
        }
    }
}

#[async_trait]
impl ApplyDriver for JobrightApply {
    fn site(&self) -> JobSite {
        JobSite::Jobright
    }

    async fn apply(
        &self,
        job_url: &str,
        _credentials: Option<&Credentials>,
        headless: bool,
    ) -> ApplyOutcome {
        let session = match BrowserSession::launch(headless).await {
            Ok(session) => session,
            Err(e) => return ApplyOutcome::not_submitted(format!("Browser launch failed: {e}")),
        };

        let outcome = self
            .attempt(session.driver(), job_url)
            .await
            .unwrap_or_else(|e| {
                warn!("Jobright apply error: {:#}", e);
                ApplyOutcome::not_submitted(e.to_string())
            });

        session.close().await;
        outcome
    }
}
