use crate::dom;
use crate::{Error, Result};
use augur_core::{Selectors, Timings};
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::page::{
    EventFileChooserOpened, SetInterceptFileChooserDialogParams,
};
use futures::{Stream, StreamExt};
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// A claimed subscription to the next file-chooser opening.
///
/// The chooser event fires once, immediately after the click that opens the
/// dialog; a subscription created after that click can miss it. This type
/// makes the ordering structural: obtain the waiter first, then perform the
/// triggering click, then `wait`.
pub(crate) struct FileChooserWaiter {
    events: Pin<Box<dyn Stream<Item = Arc<EventFileChooserOpened>> + Send>>,
}

impl FileChooserWaiter {
    /// Arm chooser interception and subscribe to the opened event. Must be
    /// called before any click that could open the dialog.
    pub(crate) async fn install(page: &Page) -> Result<Self> {
        page.execute(SetInterceptFileChooserDialogParams::new(true))
            .await?;
        let events = page.event_listener::<EventFileChooserOpened>().await?;
        Ok(Self {
            events: Box::pin(events),
        })
    }

    /// Resolve to the chooser event, bounded by `timeout`.
    pub(crate) async fn wait(mut self, timeout: Duration) -> Result<EventFileChooserOpened> {
        match tokio::time::timeout(timeout, self.events.next()).await {
            Ok(Some(event)) => Ok(event.as_ref().clone()),
            Ok(None) => Err(Error::FileChooser(
                "chooser event stream closed before the dialog opened".to_string(),
            )),
            Err(_) => Err(Error::FileChooser(format!(
                "file chooser did not open within {} ms",
                timeout.as_millis()
            ))),
        }
    }
}

/// Drives the attachment flow: open the upload menu, click through to the
/// native file chooser, and fulfill it with every path in one dialog.
pub struct AttachmentUploader<'a> {
    selectors: &'a Selectors,
    timings: &'a Timings,
}

impl<'a> AttachmentUploader<'a> {
    pub fn new(selectors: &'a Selectors, timings: &'a Timings) -> Self {
        Self { selectors, timings }
    }

    /// Hand `paths` to the page through one chooser invocation.
    ///
    /// There is no partial success: either every path reaches the dialog or
    /// the call fails and the page keeps whatever state it was in.
    pub async fn upload(&self, page: &Page, paths: &[PathBuf]) -> Result<()> {
        let chooser = FileChooserWaiter::install(page).await?;

        let menu = dom::wait_for_visible(
            page,
            &self.selectors.upload_menu_button,
            self.timings.menu_button_wait,
        )
        .await?;
        menu.click().await?;
        // Let the menu contents render before looking for the entry.
        tokio::time::sleep(self.timings.menu_settle).await;

        let entry = dom::wait_for_visible(
            page,
            &self.selectors.upload_files_button,
            self.timings.menu_item_wait,
        )
        .await?;
        entry.click().await?;
        tracing::debug!("upload entry clicked, awaiting file chooser");

        let opened = chooser.wait(self.timings.chooser_wait).await?;

        let files: Vec<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let mut params = SetFileInputFilesParams::new(files);
        params.backend_node_id = opened.backend_node_id;
        page.execute(params).await?;

        // Back to native chooser behavior for anything else on the page.
        page.execute(SetInterceptFileChooserDialogParams::new(false))
            .await?;

        tracing::info!(count = paths.len(), "attachments handed to the page");
        // Give the UI time to render upload previews before send.
        tokio::time::sleep(self.timings.upload_settle).await;
        Ok(())
    }
}

// Chooser interception needs a running browser; the subscribe-before-click
// ordering is enforced by FileChooserWaiter's shape and exercised in manual
// runs. The facade tests cover when the uploader runs, not how.
