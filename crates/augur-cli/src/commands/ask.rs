use anyhow::{Context, Result};
use augur_browser::SessionManager;
use augur_core::InteractionRequest;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

pub async fn execute(
    text: String,
    images: Vec<PathBuf>,
    profile_dir: Option<PathBuf>,
    temp_profile: bool,
    chrome_path: Option<PathBuf>,
    url: Option<String>,
) -> Result<()> {
    // Fail on missing attachments before a browser window ever opens.
    for image in &images {
        if !image.is_file() {
            anyhow::bail!("attachment not found: {}", image.display());
        }
    }

    let (config, _profile_guard) =
        super::bridge_config(profile_dir, temp_profile, chrome_path, url)?;
    let mut manager = SessionManager::new(config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("Starting browser session...");

    let session = manager
        .ensure_ready()
        .await
        .context("session init failed")?;

    spinner.set_message("Waiting for the reply...");
    let request = InteractionRequest::text(text).with_attachments(images);
    let answer = session.interact(&request).await;
    spinner.finish_and_clear();

    match answer {
        Ok(answer) => {
            println!("{}", style(answer).green());
            Ok(())
        }
        Err(e) => Err(e).context("interaction failed"),
    }
}
