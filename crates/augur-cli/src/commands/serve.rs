use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;

pub async fn execute(
    port: u16,
    bind: String,
    profile_dir: Option<PathBuf>,
    temp_profile: bool,
    chrome_path: Option<PathBuf>,
    url: Option<String>,
) -> Result<()> {
    // The server runs unattended; make sure panics reach the log too.
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {}", info);
    }));

    let (config, _profile_guard) =
        super::bridge_config(profile_dir, temp_profile, chrome_path, url)?;
    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;

    println!("✅ Bridge API on http://{}", addr);
    println!("   POST /consult  {{ \"text\": \"...\", \"images\": [{{ \"data\": \"<data url>\" }}] }}");
    println!("   The browser window opens on the first request; log in there once.");
    println!();
    println!("Target: {}", config.target_url);
    println!("Profile: {}", config.profile_dir.display());

    augur_server::serve(config, addr).await?;

    Ok(())
}
