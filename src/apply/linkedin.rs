//! LinkedIn Easy Apply driver
//!
//! Flow: login → checkpoint check → posting → Easy Apply control →
//! bounded wizard walk. The step bound keeps an unexpected or
//! adversarial multi-step form from looping forever.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::apply::{ApplyDriver, ApplyOutcome, NEXT_LABELS, SUBMIT_LABELS};
use crate::config::{Config, Credentials};
use crate::infrastructure::{BrowserSession, PageDriver};
use crate::models::JobSite;

const LOGIN_URL: &str = "https://www.linkedin.com/login";
const LOGIN_FIELD_WAIT: Duration = Duration::from_secs(15);
const SUBMIT_BUTTON_WAIT: Duration = Duration::from_secs(5);

pub struct LinkedInApply {
    apply_wait: Duration,
    max_steps: usize,
}

impl LinkedInApply {
    pub fn new(config: &Config) -> Self {
        Self {
            apply_wait: Duration::from_secs(config.apply_wait_secs),
            max_steps: config.max_apply_steps,
        }
    }

    async fn attempt(
        &self,
        driver: &PageDriver,
        job_url: &str,
        credentials: &Credentials,
    ) -> Result<ApplyOutcome> {
        info!("🌐 Opening LinkedIn login page...");
        driver.goto(LOGIN_URL).await?;
        driver
            .type_into("#username", &credentials.email, LOGIN_FIELD_WAIT)
            .await?;
        driver
            .type_into("#password", &credentials.password, LOGIN_FIELD_WAIT)
            .await?;
        driver
            .click_css("button[type='submit']", SUBMIT_BUTTON_WAIT)
            .await?;
        sleep(Duration::from_secs(3)).await;

        // A checkpoint/challenge redirect means a verification wall we
        // never try to solve
        let url = driver.current_url().await?;
        if url.contains("checkpoint") || url.contains("challenge") {
            warn!("CAPTCHA detected on LinkedIn login. Manual login required.");
            return Ok(ApplyOutcome::not_submitted("CAPTCHA login required"));
        }

        driver.goto(job_url).await?;
        sleep(Duration::from_secs(3)).await;

        info!("🔎 Checking for Easy Apply button on: {}", job_url);
        if driver
            .click_control_within(&["Easy Apply", "Apply now"], self.apply_wait)
            .await?
            .is_none()
        {
            return Ok(ApplyOutcome::not_submitted("Easy Apply not found"));
        }
        sleep(Duration::from_secs(2)).await;

        // Wizard walk: an enabled submit-type control wins; otherwise
        // advance; neither present ends the walk early
        for _ in 0..self.max_steps {
            if driver.click_control(SUBMIT_LABELS).await?.is_some() {
                sleep(Duration::from_secs(3)).await;
                return Ok(ApplyOutcome::submitted("Submitted successfully"));
            }
            if driver.click_control(NEXT_LABELS).await?.is_none() {
                break;
            }
            sleep(Duration::from_secs(2)).await;
        }

        warn!("Complex LinkedIn apply form detected (manual input required).");
        Ok(ApplyOutcome::not_submitted("Complex flow (manual)"))
    }
}

#[async_trait]
impl ApplyDriver for LinkedInApply {
    fn site(&self) -> JobSite {
        JobSite::LinkedIn
    }

    async fn apply(
        &self,
        job_url: &str,
        credentials: Option<&Credentials>,
        headless: bool,
    ) -> ApplyOutcome {
        // Precondition, not a retryable fault
        let Some(credentials) = credentials else {
            warn!("LinkedIn credentials not provided.");
            return ApplyOutcome::not_submitted("No credentials");
        };

        let session = match BrowserSession::launch(headless).await {
            Ok(session) => session,
            Err(e) => return ApplyOutcome::not_submitted(format!("Browser launch failed: {e}")),
        };

        let outcome = self
            .attempt(session.driver(), job_url, credentials)
            .await
            .unwrap_or_else(|e| {
                warn!("LinkedIn apply error: {:#}", e);
                ApplyOutcome::not_submitted(e.to_string())
            });

        session.close().await;
        outcome
    }
}
