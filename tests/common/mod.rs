//! Shared helpers for integration tests.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static TEST_SETUP: Once = Once::new();

/// Installs a global `tracing` subscriber once per test binary.
///
/// The filter comes from `RUST_LOG` and defaults to `debug`, so growth and
/// rebalancing events show up in `cargo test -- --nocapture` output.
pub fn init_test_logging() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_filter(env_filter),
        );
        if subscriber.try_init().is_ok() {
            debug!("test logging initialized");
        }
    });
}

/// Identity-style hash for `u64` elements, so bucket indices are predictable.
#[allow(dead_code)]
pub fn identity_hash(value: &u64) -> u64 {
    *value
}
