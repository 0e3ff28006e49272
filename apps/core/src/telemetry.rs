//! Tracing setup shared by binaries and tests.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber with an env-based filter.
///
/// Reads `RUST_LOG`, defaulting to `info`. Safe to call more than once;
/// subsequent calls are no-ops (important for tests, which may each try
/// to install a subscriber).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
