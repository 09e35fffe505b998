//! Response synchronization: deciding that a reply has arrived and that it
//! has finished rendering.
//!
//! The target application streams replies into the DOM and emits no
//! completion event, so both decisions are polling protocols. Phase A
//! watches the transcript entry count grow past a baseline captured before
//! the send click; phase B samples the last entry's text at a fixed
//! interval until it stops changing.

use crate::{Error, Result};
use async_trait::async_trait;
use augur_core::Timings;
use chromiumoxide::Page;
use tokio::time::{self, Instant};

/// Returned when the transcript has no entries at final read time.
pub const NO_RESPONSE: &str = "No response found";
/// Returned when the newest entry exists but carries no text.
pub const EMPTY_RESPONSE: &str = "Empty response";

/// A point-in-time view of the conversation transcript.
///
/// Implemented by [`LiveTranscript`] over the real page and by scripted
/// fakes in tests. Every call re-reads the live document; nothing is
/// cached between polls.
#[async_trait]
pub trait TranscriptView: Send + Sync {
    /// Number of rendered message entries right now.
    async fn entry_count(&self) -> Result<usize>;

    /// Text of the last message entry, or `None` when there are none.
    async fn last_entry_text(&self) -> Result<Option<String>>;
}

/// [`TranscriptView`] over the live page, reading the configured
/// message-entry selector through JS evaluation.
pub struct LiveTranscript<'a> {
    page: &'a Page,
    selector_literal: String,
}

impl<'a> LiveTranscript<'a> {
    pub fn new(page: &'a Page, selector: &str) -> Self {
        Self {
            page,
            selector_literal: serde_json::Value::String(selector.to_string()).to_string(),
        }
    }
}

#[async_trait]
impl TranscriptView for LiveTranscript<'_> {
    async fn entry_count(&self) -> Result<usize> {
        let script = format!(
            "document.querySelectorAll({}).length",
            self.selector_literal
        );
        let count = self
            .page
            .evaluate(script)
            .await?
            .value()
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Ok(count as usize)
    }

    async fn last_entry_text(&self) -> Result<Option<String>> {
        let script = format!(
            "(() => {{ const entries = document.querySelectorAll({sel}); \
             if (entries.length === 0) return null; \
             const last = entries[entries.length - 1]; \
             return last.innerText || last.textContent || ''; }})()",
            sel = self.selector_literal,
        );
        let result = self.page.evaluate(script).await?;
        Ok(result
            .value()
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }
}

/// The two-phase completion detector.
pub struct ResponseSynchronizer {
    timings: Timings,
}

impl ResponseSynchronizer {
    pub fn new(timings: Timings) -> Self {
        Self { timings }
    }

    /// Entry count before the send click. Completion is always judged
    /// against this, so text from an entry that predates the submission is
    /// never returned.
    pub async fn baseline<V: TranscriptView + ?Sized>(&self, view: &V) -> Result<usize> {
        view.entry_count().await
    }

    /// Block until a new entry appears and its text settles, then read it.
    ///
    /// Arrival timeout is a hard failure; a stability budget that runs out
    /// is not, the last observed text goes back as a best effort.
    pub async fn await_reply<V: TranscriptView + ?Sized>(
        &self,
        view: &V,
        baseline: usize,
    ) -> Result<String> {
        self.wait_for_arrival(view, baseline).await?;
        tracing::debug!("new reply detected, waiting for text to stabilize");
        self.wait_for_stability(view).await?;
        self.read_reply(view).await
    }

    /// Phase A: poll the entry count until it exceeds `baseline`.
    async fn wait_for_arrival<V: TranscriptView + ?Sized>(
        &self,
        view: &V,
        baseline: usize,
    ) -> Result<()> {
        let deadline = Instant::now() + self.timings.arrival_timeout;
        loop {
            if view.entry_count().await? > baseline {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::ResponseTimeout(
                    self.timings.arrival_timeout.as_millis() as u64,
                ));
            }
            time::sleep(self.timings.arrival_poll).await;
        }
    }

    /// Phase B: sample the last entry's text until the same non-empty text
    /// shows up `stability_samples` times in a row, or the budget runs out.
    async fn wait_for_stability<V: TranscriptView + ?Sized>(&self, view: &V) -> Result<()> {
        let mut last: Option<String> = None;
        let mut run = 0u32;

        for _ in 0..self.timings.stability_budget {
            time::sleep(self.timings.stability_interval).await;
            let sample = view.last_entry_text().await?.unwrap_or_default();

            if sample.is_empty() {
                run = 0;
            } else if last.as_deref() == Some(sample.as_str()) {
                run += 1;
            } else {
                run = 1;
            }

            if run >= self.timings.stability_samples {
                tracing::debug!("reply text stabilized");
                return Ok(());
            }

            last = Some(sample);
        }

        tracing::debug!("stability budget exhausted, taking last observed text");
        Ok(())
    }

    /// The final read. An empty transcript is not an error here; the
    /// sentinel goes back to the caller instead.
    async fn read_reply<V: TranscriptView + ?Sized>(&self, view: &V) -> Result<String> {
        match view.last_entry_text().await? {
            None => Ok(NO_RESPONSE.to_string()),
            Some(text) if text.is_empty() => Ok(EMPTY_RESPONSE.to_string()),
            Some(text) => Ok(text),
        }
    }
}
