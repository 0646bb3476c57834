//! Tracing setup for the `bmi` binary.
//!
//! The library only emits events. History load and save failures are logged
//! at `error`, skipped history entries at `warn`, backend I/O at `debug`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a compact stderr subscriber, filtered by `RUST_LOG` when set and
/// by `default_level` otherwise
///
/// Stdout is left to command output. Panics if a global subscriber is
/// already installed.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route events into the test harness output; safe to call from every test
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
