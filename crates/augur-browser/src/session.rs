use crate::chrome_finder::ChromeFinder;
use crate::profile::ProfileManager;
use crate::surface::LivePage;
use crate::{Error, Result, dom, interact};
use augur_core::{BridgeConfig, InteractionRequest};
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;

/// One live browser session: the launched browser, the single page used for
/// every interaction, and the CDP message-pump task.
///
/// Single-writer contract: `interact` takes `&mut self`, so one session can
/// never run two interactions at once. Callers that share a session across
/// tasks must serialize access themselves; the HTTP layer does so with an
/// async mutex around the [`SessionManager`].
pub struct Session {
    config: BridgeConfig,
    // Held for the life of the session; dropping the browser handle ends
    // the CDP connection.
    _browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl Session {
    /// Launch the browser and navigate it to the target application.
    ///
    /// The window is deliberately visible: it gives the operator an
    /// auditable view of what the automation is doing, and a place to log
    /// in interactively. The persistent profile keeps that login across
    /// restarts. Any failure here is `SessionInit` and means restart the
    /// process; there is no retry.
    pub async fn launch(config: BridgeConfig) -> Result<Self> {
        let chrome = ChromeFinder::new(config.chrome_path.clone()).find()?;
        let profile = ProfileManager::persistent(config.profile_dir.clone())?;
        tracing::info!(
            "launching {} with profile {}",
            chrome.display(),
            profile.path().display()
        );

        let browser_config = BrowserConfig::builder()
            .with_head()
            .chrome_executable(chrome)
            .user_data_dir(profile.path())
            .arg("--disable-blink-features=AutomationControlled")
            .build()
            .map_err(|e| Error::SessionInit(format!("invalid browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::SessionInit(format!("browser launch failed: {}", e)))?;

        // The pump must run for every subsequent CDP command to resolve.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        // Reuse the tab the browser opened with, or open one.
        let page = match browser
            .pages()
            .await
            .map_err(|e| Error::SessionInit(format!("could not list pages: {}", e)))?
            .into_iter()
            .next()
        {
            Some(page) => page,
            None => browser
                .new_page("about:blank")
                .await
                .map_err(|e| Error::SessionInit(format!("could not open a page: {}", e)))?,
        };

        page.goto(config.target_url.as_str()).await.map_err(|e| {
            Error::SessionInit(format!(
                "navigation to {} failed: {}",
                config.target_url, e
            ))
        })?;
        dom::wait_for_dom_parsed(&page, config.timings.dom_parse_wait).await?;

        tracing::info!("browser session ready at {}", config.target_url);
        Ok(Self {
            config,
            _browser: browser,
            page,
            handler_task,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Run one full interaction against this session's page.
    pub async fn interact(&mut self, request: &InteractionRequest) -> Result<String> {
        let surface = LivePage::new(&self.page, &self.config);
        interact::run(&surface, &self.config.timings, request).await
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

/// Lazily creates the session on first use and hands out the same one for
/// every later call.
///
/// Owned, not global: drop the manager and the session goes with it, and
/// two managers with different configs can coexist (against different
/// profiles) in one process.
pub struct SessionManager {
    config: BridgeConfig,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// The session, launching it on first call.
    ///
    /// A failed launch leaves the slot empty and returns `SessionInit`; per
    /// the session contract the process is expected to be restarted rather
    /// than retried, so no backoff or relaunch logic lives here.
    pub async fn ensure_ready(&mut self) -> Result<&mut Session> {
        match &mut self.session {
            Some(session) => Ok(session),
            slot => {
                let session = Session::launch(self.config.clone()).await?;
                Ok(slot.insert(session))
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manager_starts_without_a_session() {
        let config = BridgeConfig::new().unwrap();
        let manager = SessionManager::new(config);
        assert!(!manager.is_ready());
    }

    // Launch/navigation paths need a Chrome install and a display; they are
    // exercised by `augur ask` and `augur serve` against the real browser.
}
