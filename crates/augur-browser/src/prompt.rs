use crate::dom;
use crate::Result;
use augur_core::{Selectors, Timings};
use chromiumoxide::Page;

/// Types the prompt into the page's editable surface.
pub struct PromptSubmitter<'a> {
    selectors: &'a Selectors,
    timings: &'a Timings,
}

impl<'a> PromptSubmitter<'a> {
    pub fn new(selectors: &'a Selectors, timings: &'a Timings) -> Self {
        Self { selectors, timings }
    }

    /// Wait for the prompt surface, focus it, and type `text` into it.
    ///
    /// The text goes in keystroke by keystroke rather than as one value
    /// assignment: the UI arms its send control off real input events, and
    /// a bulk write would leave it disabled. The settle after the focus
    /// click keeps the first keystrokes from racing the page's own focus
    /// handlers.
    pub async fn submit(&self, page: &Page, text: &str) -> Result<()> {
        let input =
            dom::wait_for_visible(page, &self.selectors.prompt_input, self.timings.input_wait)
                .await?;

        input.click().await?;
        tokio::time::sleep(self.timings.focus_settle).await;
        input.type_str(text).await?;

        tracing::debug!(chars = text.chars().count(), "prompt typed");
        Ok(())
    }
}

// Driving a real editable surface needs a running browser; covered by the
// facade tests over a scripted surface and by manual runs.
