//! Browser session guard - infrastructure layer
//!
//! Couples a launched browser with its page driver. Every apply attempt
//! acquires one session and must route every exit path through
//! [`BrowserSession::close`]; a leaked session degrades subsequent runs.

use anyhow::Result;
use chromiumoxide::Browser;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::browser::launch_browser;
use crate::infrastructure::PageDriver;

/// One exclusive browser session.
pub struct BrowserSession {
    browser: Browser,
    driver: PageDriver,
    events: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a fresh browser and wrap its page in a driver.
    pub async fn launch(headless: bool) -> Result<Self> {
        let (browser, page, events) = launch_browser(headless).await?;
        Ok(Self {
            browser,
            driver: PageDriver::new(page),
            events,
        })
    }

    pub fn driver(&self) -> &PageDriver {
        &self.driver
    }

    /// Close the browser and reap the process.
    ///
    /// Consumes the session so no driver handle can outlive the browser.
    /// Shutdown faults are logged at debug; there is nothing actionable
    /// left for the caller at this point.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            debug!("Browser close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Browser wait failed: {}", e);
        }
        self.events.abort();
    }
}
