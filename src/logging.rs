//! Logging setup
//!
//! One-time `tracing` initialisation for the binary and ignored tests.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// Honours `RUST_LOG`; defaults to `info` for the agent itself and quiets
/// the chatty CDP/event layers underneath.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chromiumoxide=warn,tungstenite=warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}
