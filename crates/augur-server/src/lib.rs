//! HTTP facade for the augur browser bridge.
//!
//! Thin plumbing around the core: `POST /consult` stages inline images to
//! temp files, admits one interaction at a time, and maps the bridge's
//! errors to JSON responses. Nothing here touches the page directly.

pub mod images;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;

use augur_browser::SessionManager;
use augur_core::BridgeConfig;
use std::net::SocketAddr;
use std::sync::Arc;

/// Bind `addr` and serve the bridge API until the process ends.
///
/// The browser session is created lazily by the first `/consult` request,
/// not at startup, so the server comes up even with no display attached.
pub async fn serve(config: BridgeConfig, addr: SocketAddr) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(SessionManager::new(config)));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("bridge API listening on {}", addr);

    axum::serve(listener, app).await
}
