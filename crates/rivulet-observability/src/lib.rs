// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rivulet Observability — Tracing subscriber setup.
//!
//! # Design
//! - Library crates only emit `tracing` events; installing a subscriber is
//!   left to the binary or test harness.
//! - `RUST_LOG` wins over the default filter.

use std::sync::Once;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

static INIT_TEST_LOGGING: Once = Once::new();

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "rivulet_core=info,rivulet_stream=info";

/// Install a global fmt subscriber.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Initialize trace-level logging routed through the test writer.
///
/// Safe to call multiple times; only the first call has an effect.
pub fn init_test_logging() {
    INIT_TEST_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::info!("logging initialized");
    }

    #[test]
    fn second_global_init_reports_false() {
        init_test_logging();
        assert!(!init_tracing(DEFAULT_FILTER));
    }
}
