//! Shared types for the augur browser bridge: configuration (target URL,
//! selectors, timing knobs) and the per-call interaction request.

pub mod config;
pub mod error;
pub mod request;

pub use config::{BridgeConfig, DEFAULT_TARGET_URL, Selectors, Timings};
pub use error::{Error, Result};
pub use request::InteractionRequest;
