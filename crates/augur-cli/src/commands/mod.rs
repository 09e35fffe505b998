pub mod ask;
pub mod completion;
pub mod serve;

use anyhow::Result;
use augur_browser::ProfileManager;
use augur_core::BridgeConfig;
use std::path::PathBuf;

/// Build the bridge configuration from the shared CLI flags.
///
/// Returns the temp-profile guard alongside the config; when `--temp-profile`
/// was given, the guard owns the directory and must stay alive until the
/// process exits, or the browser's profile vanishes underneath it.
pub fn bridge_config(
    profile_dir: Option<PathBuf>,
    temp_profile: bool,
    chrome_path: Option<PathBuf>,
    url: Option<String>,
) -> Result<(BridgeConfig, Option<ProfileManager>)> {
    let mut config = BridgeConfig::new()?;
    config.chrome_path = chrome_path;

    if let Some(url) = url {
        config = config.with_target_url(&url)?;
    }

    let mut guard = None;
    if temp_profile {
        let profile = ProfileManager::temporary()?;
        config.profile_dir = profile.path().to_path_buf();
        guard = Some(profile);
    } else if let Some(dir) = profile_dir {
        config.profile_dir = dir;
    }

    Ok((config, guard))
}
