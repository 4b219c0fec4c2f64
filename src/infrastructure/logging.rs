//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info` for this crate.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notegate=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
