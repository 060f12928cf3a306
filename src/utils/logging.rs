//! Tracing subscriber setup
//!
//! The library itself only emits `tracing` events; binaries and tests that
//! want to see them can call [`init_logging`] once at startup.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `default_filter` is used when `RUST_LOG` is not set, e.g. `"batchflow=info"`.
/// Subsequent calls are no-ops so tests can call this freely.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .try_init();
}
