//! Tracing bootstrap shared by binaries, tests and benchmarks.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a global `tracing` subscriber with an `EnvFilter` and a fmt layer.
///
/// Reads the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// Returns `false` if a global subscriber was already installed, so it is
/// safe to call from every test.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
