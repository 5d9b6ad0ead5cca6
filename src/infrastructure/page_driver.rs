//! Page driver - infrastructure layer
//!
//! Owns the page resource and exposes capabilities only: navigation,
//! field input and label-based control clicking, all executed as
//! injected JS. Knows nothing about postings, platforms or the apply
//! flow.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use chromiumoxide::Page;
use serde_json::Value as JsonValue;
use tokio::time::sleep;
use tracing::debug;

/// Poll interval for bounded element/control waits.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Page driver
///
/// Responsibilities:
/// - hold the single `Page` of a browser session
/// - expose navigation, eval and input capabilities
/// - never decide flow order
pub struct PageDriver {
    page: Page,
}

impl PageDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Navigate to a URL.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    /// Current page URL; empty when the page has none yet.
    pub async fn current_url(&self) -> Result<String> {
        let value = self.eval("window.location.href").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Execute JS and return the JSON result.
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// Focus a field and set its value, firing the input events forms
    /// listen for. Waits (bounded) for the field to render first.
    pub async fn type_into(&self, css: &str, text: &str, timeout: Duration) -> Result<()> {
        let script = fill_script(css, text);
        let deadline = Instant::now() + timeout;
        loop {
            if is_ok(&self.eval(script.clone()).await?) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                bail!("element not found: {}", css);
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Click the first enabled element matching a CSS selector, with a
    /// bounded wait for it to render.
    pub async fn click_css(&self, css: &str, timeout: Duration) -> Result<()> {
        let script = click_script(css);
        let deadline = Instant::now() + timeout;
        loop {
            if is_ok(&self.eval(script.clone()).await?) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                bail!("element not found: {}", css);
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Click the first enabled control whose visible label contains one of
    /// the given variants. Returns the label that matched, if any.
    ///
    /// Runs as injected JS so anchor text, button text and input values are
    /// all matched the same way.
    pub async fn click_control(&self, labels: &[&str]) -> Result<Option<String>> {
        let result = self.eval(control_click_script(labels)).await?;
        if is_clicked(&result) {
            let label = result
                .get("label")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            debug!("Clicked control: {}", label);
            Ok(Some(label))
        } else {
            Ok(None)
        }
    }

    /// Like [`click_control`](Self::click_control) but keeps polling until
    /// the wait bound expires. Used where the control renders late.
    pub async fn click_control_within(
        &self,
        labels: &[&str],
        wait: Duration,
    ) -> Result<Option<String>> {
        let deadline = Instant::now() + wait;
        loop {
            if let Some(label) = self.click_control(labels).await? {
                return Ok(Some(label));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

fn is_ok(result: &JsonValue) -> bool {
    result.get("ok").and_then(|v| v.as_bool()).unwrap_or(false)
}

fn is_clicked(result: &JsonValue) -> bool {
    result
        .get("clicked")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// JSON-quote a string for safe embedding in a JS literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// JS that fills a form field and fires the events frameworks listen for.
fn fill_script(css: &str, text: &str) -> String {
    let css = js_string(css);
    let text = js_string(text);
    format!(
        r#"
        (() => {{
            const el = document.querySelector({css});
            if (!el) return {{ ok: false }};
            el.focus();
            el.value = {text};
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return {{ ok: true }};
        }})()
        "#
    )
}

/// JS that clicks the first enabled match of a CSS selector.
fn click_script(css: &str) -> String {
    let css = js_string(css);
    format!(
        r#"
        (() => {{
            const el = document.querySelector({css});
            if (!el || el.disabled) return {{ ok: false }};
            el.click();
            return {{ ok: true }};
        }})()
        "#
    )
}

/// JS that scans clickable nodes for a label variant and clicks the first
/// enabled match. Labels are injected as a JSON array literal.
fn control_click_script(labels: &[&str]) -> String {
    let labels_json = serde_json::to_string(labels).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"
        (() => {{
            const labels = {labels_json};
            const nodes = Array.from(document.querySelectorAll(
                'button, a, input[type="submit"], input[type="button"]'
            ));
            for (const label of labels) {{
                const needle = label.toLowerCase();
                for (const el of nodes) {{
                    const text = ((el.innerText || el.textContent || el.value || '') + '')
                        .trim()
                        .toLowerCase();
                    if (!text.includes(needle)) continue;
                    if (el.disabled) continue;
                    el.click();
                    return {{ clicked: true, label: label }};
                }}
            }}
            return {{ clicked: false }};
        }})()
        "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_script_embeds_labels_as_json() {
        let script = control_click_script(&["Easy Apply", "Apply now"]);
        assert!(script.contains(r#"["Easy Apply","Apply now"]"#));
        assert!(script.contains("el.disabled"));
    }

    #[test]
    fn selectors_and_text_are_json_quoted() {
        let script = fill_script("input[name='commit']", r#"pa"ss"#);
        assert!(script.contains(r#""input[name='commit']""#));
        assert!(script.contains(r#""pa\"ss""#));
    }

    #[test]
    fn click_script_guards_disabled_controls() {
        let script = click_script("button[type='submit']");
        assert!(script.contains("el.disabled"));
    }
}
