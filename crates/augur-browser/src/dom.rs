use crate::{Error, Result};
use chromiumoxide::{Element, Page};
use std::time::Duration;
use tokio::time::Instant;

const PROBE_INTERVAL: Duration = Duration::from_millis(100);

/// Embed a selector into a probe script as a JS string literal.
fn quote(selector: &str) -> String {
    serde_json::Value::String(selector.to_string()).to_string()
}

/// Wait until `selector` matches an element with a non-empty client rect,
/// then return its handle. Bounded by `timeout`.
///
/// Attached-but-hidden elements do not count: the controls this bridge
/// clicks only accept input once the page has actually rendered them.
pub(crate) async fn wait_for_visible(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<Element> {
    let probe = format!(
        "(() => {{ const el = document.querySelector({sel}); if (!el) return false; \
         const r = el.getBoundingClientRect(); return r.width > 0 && r.height > 0; }})()",
        sel = quote(selector),
    );

    let deadline = Instant::now() + timeout;
    loop {
        let visible = page
            .evaluate(probe.as_str())
            .await?
            .value()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        if visible {
            if let Ok(element) = page.find_element(selector).await {
                return Ok(element);
            }
        }

        if Instant::now() >= deadline {
            return Err(Error::ElementNotFound {
                selector: selector.to_string(),
                waited_ms: timeout.as_millis() as u64,
            });
        }

        tokio::time::sleep(PROBE_INTERVAL).await;
    }
}

/// Wait for the document to leave the "loading" state after navigation.
///
/// DOM parsed is enough; the target application keeps network connections
/// open indefinitely, so waiting for idle would never return. Expiry is not
/// an error, the caller proceeds against whatever has rendered.
pub(crate) async fn wait_for_dom_parsed(page: &Page, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        let state = page
            .evaluate("document.readyState")
            .await?
            .value()
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .unwrap_or_default();

        if state != "loading" && !state.is_empty() {
            return Ok(());
        }

        if Instant::now() >= deadline {
            tracing::debug!("document still parsing after {:?}, continuing", timeout);
            return Ok(());
        }

        tokio::time::sleep(PROBE_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes_selector_for_js() {
        let quoted = quote(r#"button[aria-label="Send message"]"#);
        assert_eq!(quoted, r#""button[aria-label=\"Send message\"]""#);
    }
}
