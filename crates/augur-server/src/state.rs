use augur_browser::SessionManager;
use tokio::sync::Mutex;

/// Shared server state.
///
/// The mutex is the admission control the core requires: the bridge drives
/// a single browser tab, so at most one interaction may be in flight.
/// Concurrent requests queue on the lock instead of racing the page.
pub struct AppState {
    pub manager: Mutex<SessionManager>,
}

impl AppState {
    pub fn new(manager: SessionManager) -> Self {
        Self {
            manager: Mutex::new(manager),
        }
    }
}
