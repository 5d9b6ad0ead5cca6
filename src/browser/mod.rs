//! Browser launching
//!
//! Starts a dedicated Chromium instance per apply attempt and hands back
//! the browser plus a blank page. Event handling runs on a background
//! task for the lifetime of the browser.

use anyhow::Result;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error};

/// Launch a Chromium instance.
///
/// `headless=false` opens a visible window, which is what the apply flows
/// default to since several platforms fingerprint headless sessions.
pub async fn launch_browser(headless: bool) -> Result<(Browser, Page, JoinHandle<()>)> {
    debug!("Launching browser (headless: {})", headless);

    let mut builder = BrowserConfig::builder()
        .window_size(1920, 1080)
        .args(vec![
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-infobars",
            "--disable-extensions",
        ]);
    if headless {
        builder = builder.new_headless_mode();
    } else {
        builder = builder.with_head();
    }

    let config = builder.build().map_err(|e| {
        error!("Browser configuration failed: {}", e);
        anyhow::anyhow!("browser configuration failed: {}", e)
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("Browser launch failed: {}", e);
        anyhow::anyhow!("browser launch failed: {}", e)
    })?;
    debug!("Browser launched");

    // Drive CDP events in the background until the browser goes away
    let events = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // Short settle delay so the browser state is synchronized
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("Page creation failed: {}", e);
        anyhow::anyhow!("page creation failed: {}", e)
    })?;

    Ok((browser, page, events))
}
