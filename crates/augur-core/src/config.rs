use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Application the bridge drives unless configured otherwise.
pub const DEFAULT_TARGET_URL: &str = "https://gemini.google.com/";

/// CSS selectors for the small fixed set of elements the bridge touches.
///
/// These track the target application's DOM and are the first thing to
/// update when the page layout changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// Editable prompt surface.
    pub prompt_input: String,
    /// Control that opens the attachment menu.
    pub upload_menu_button: String,
    /// "Upload files" entry inside the attachment menu. Clicking this is
    /// what opens the native file chooser.
    pub upload_files_button: String,
    /// Send control.
    pub send_button: String,
    /// One rendered transcript entry.
    pub message_entry: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            prompt_input: r#"div.ql-editor[contenteditable="true"]"#.to_string(),
            upload_menu_button: r#"button[aria-label="Open upload file menu"]"#.to_string(),
            upload_files_button: r#"button[data-test-id="local-images-files-uploader-button"]"#
                .to_string(),
            send_button: r#"button[aria-label="Send message"]"#.to_string(),
            message_entry: "message-content".to_string(),
        }
    }
}

/// Every wait, settle delay, poll interval, and threshold the bridge uses.
///
/// The target application gives no completion signal, so all of these are
/// heuristics. They are configuration, not constants, both so deployments
/// can tune them and so tests can shrink them against a fake clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timings {
    /// Bound on the prompt surface becoming visible.
    pub input_wait: Duration,
    /// Pause after focusing the prompt surface, before typing.
    pub focus_settle: Duration,
    /// Bound on the attachment-menu control becoming visible.
    pub menu_button_wait: Duration,
    /// Pause after opening the attachment menu, for its contents to render.
    pub menu_settle: Duration,
    /// Bound on the "upload files" menu entry becoming visible.
    pub menu_item_wait: Duration,
    /// Bound on the file chooser opening after the triggering click.
    pub chooser_wait: Duration,
    /// Pause after handing paths to the chooser, for upload previews.
    pub upload_settle: Duration,
    /// Bound on the send control becoming visible.
    pub send_button_wait: Duration,
    /// Bound on the document leaving the "loading" state after navigation.
    pub dom_parse_wait: Duration,
    /// Bound on a new transcript entry appearing after send (phase A).
    pub arrival_timeout: Duration,
    /// Entry-count poll interval during phase A.
    pub arrival_poll: Duration,
    /// Spacing between text samples during phase B.
    pub stability_interval: Duration,
    /// Consecutive identical non-empty samples that count as "finished".
    pub stability_samples: u32,
    /// Maximum number of phase-B samples before giving up and returning
    /// whatever was last observed.
    pub stability_budget: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            input_wait: Duration::from_secs(15),
            focus_settle: Duration::from_millis(500),
            menu_button_wait: Duration::from_secs(5),
            menu_settle: Duration::from_millis(800),
            menu_item_wait: Duration::from_secs(5),
            chooser_wait: Duration::from_secs(30),
            upload_settle: Duration::from_secs(2),
            send_button_wait: Duration::from_secs(5),
            dom_parse_wait: Duration::from_secs(10),
            arrival_timeout: Duration::from_secs(60),
            arrival_poll: Duration::from_millis(100),
            stability_interval: Duration::from_secs(1),
            stability_samples: 2,
            stability_budget: 60,
        }
    }
}

/// Top-level configuration for one browser-session bridge.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Root URL of the application being automated.
    pub target_url: String,
    /// On-disk browser profile, reused across restarts so login cookies
    /// survive.
    pub profile_dir: PathBuf,
    /// Explicit Chrome binary, or None for platform discovery.
    pub chrome_path: Option<PathBuf>,
    pub selectors: Selectors,
    pub timings: Timings,
}

impl BridgeConfig {
    /// Configuration with defaults: the standard target URL and the
    /// per-user profile directory.
    pub fn new() -> Result<Self> {
        Ok(Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            profile_dir: Self::default_profile_dir()?,
            chrome_path: None,
            selectors: Selectors::default(),
            timings: Timings::default(),
        })
    }

    /// `~/.augur/profile`
    pub fn default_profile_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".augur").join("profile"))
            .ok_or(Error::NoHomeDir)
    }

    /// Replace the target URL, validating it parses as an absolute URL.
    pub fn with_target_url(mut self, target_url: &str) -> Result<Self> {
        url::Url::parse(target_url).map_err(|source| Error::InvalidUrl {
            url: target_url.to_string(),
            source,
        })?;
        self.target_url = target_url.to_string();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_match_target_app() {
        let selectors = Selectors::default();
        assert!(selectors.prompt_input.contains("contenteditable"));
        assert!(selectors.send_button.contains("Send message"));
        assert_eq!(selectors.message_entry, "message-content");
    }

    #[test]
    fn test_default_timings() {
        let timings = Timings::default();
        assert_eq!(timings.input_wait, Duration::from_secs(15));
        assert_eq!(timings.arrival_timeout, Duration::from_secs(60));
        assert_eq!(timings.stability_interval, Duration::from_secs(1));
        assert_eq!(timings.stability_samples, 2);
        assert_eq!(timings.stability_budget, 60);
    }

    #[test]
    fn test_with_target_url_accepts_absolute_url() {
        let config = BridgeConfig::new().unwrap();
        let config = config.with_target_url("https://example.com/chat").unwrap();
        assert_eq!(config.target_url, "https://example.com/chat");
    }

    #[test]
    fn test_with_target_url_rejects_garbage() {
        let config = BridgeConfig::new().unwrap();
        assert!(config.with_target_url("not a url").is_err());
    }
}
