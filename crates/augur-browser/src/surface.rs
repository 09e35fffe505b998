use crate::interact::ChatSurface;
use crate::prompt::PromptSubmitter;
use crate::sync::{LiveTranscript, TranscriptView};
use crate::upload::AttachmentUploader;
use crate::{Result, dom};
use async_trait::async_trait;
use augur_core::BridgeConfig;
use chromiumoxide::Page;
use std::path::PathBuf;

/// The live page, presented through the traits the facade and synchronizer
/// compose against.
pub struct LivePage<'a> {
    page: &'a Page,
    config: &'a BridgeConfig,
    transcript: LiveTranscript<'a>,
}

impl<'a> LivePage<'a> {
    pub fn new(page: &'a Page, config: &'a BridgeConfig) -> Self {
        Self {
            page,
            config,
            transcript: LiveTranscript::new(page, &config.selectors.message_entry),
        }
    }
}

#[async_trait]
impl TranscriptView for LivePage<'_> {
    async fn entry_count(&self) -> Result<usize> {
        self.transcript.entry_count().await
    }

    async fn last_entry_text(&self) -> Result<Option<String>> {
        self.transcript.last_entry_text().await
    }
}

#[async_trait]
impl ChatSurface for LivePage<'_> {
    async fn submit_prompt(&self, text: &str) -> Result<()> {
        PromptSubmitter::new(&self.config.selectors, &self.config.timings)
            .submit(self.page, text)
            .await
    }

    async fn upload_attachments(&self, paths: &[PathBuf]) -> Result<()> {
        AttachmentUploader::new(&self.config.selectors, &self.config.timings)
            .upload(self.page, paths)
            .await
    }

    async fn click_send(&self) -> Result<()> {
        let send = dom::wait_for_visible(
            self.page,
            &self.config.selectors.send_button,
            self.config.timings.send_button_wait,
        )
        .await?;
        send.click().await?;
        Ok(())
    }
}
