//! The single externally callable operation: submit a prompt (and optional
//! attachments), wait for the reply, extract it.

use crate::Result;
use crate::sync::{ResponseSynchronizer, TranscriptView};
use async_trait::async_trait;
use augur_core::{InteractionRequest, Timings};
use std::path::PathBuf;

/// The page operations the facade composes, in the order it drives them.
///
/// [`crate::LivePage`] binds these to the real browser; tests script them.
#[async_trait]
pub trait ChatSurface: TranscriptView {
    /// Focus the prompt surface and type `text` into it.
    async fn submit_prompt(&self, text: &str) -> Result<()>;

    /// Hand `paths` to the page's file chooser, all in one dialog.
    async fn upload_attachments(&self, paths: &[PathBuf]) -> Result<()>;

    /// Click the send control.
    async fn click_send(&self) -> Result<()>;
}

/// Run one full interaction against `surface` and return the reply text.
///
/// Steps run in strict order and the first failure propagates unchanged.
/// Nothing is rolled back on failure: the page stays however the browser
/// left it, and retrying against the same session is the caller's call.
pub async fn run<S: ChatSurface + ?Sized>(
    surface: &S,
    timings: &Timings,
    request: &InteractionRequest,
) -> Result<String> {
    let synchronizer = ResponseSynchronizer::new(timings.clone());

    // Captured before anything touches the page, so the reply is always
    // judged against the transcript as it stood before this interaction.
    let baseline = synchronizer.baseline(surface).await?;
    tracing::debug!(baseline, "transcript baseline captured");

    surface.submit_prompt(&request.text).await?;

    if request.has_attachments() {
        surface.upload_attachments(&request.attachments).await?;
    }

    surface.click_send().await?;
    tracing::debug!("prompt sent");

    synchronizer.await_reply(surface, baseline).await
}
