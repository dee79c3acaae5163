use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*};

/// Environment variable read by [`init_test_tracing`] to decide whether test logs are shown.
const TEST_LOG_ENV_NAME: &str = "TEST_LOG";

/// Filter used by [`init_test_tracing`] when `RUST_LOG` is not set.
const DEFAULT_TEST_FILTER: &str = "chair=debug";

static INIT_TEST_TRACING: Once = Once::new();

/// Installs a global `fmt` subscriber filtered by `filter`.
///
/// `filter` uses the [`EnvFilter`] directive syntax (`"chair=info,warn"`). The `RUST_LOG`
/// environment variable, when set, takes precedence over it.
///
/// Fails if a global subscriber was already installed.
pub fn init_tracing(filter: &str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
}

/// Installs a subscriber for tests.
///
/// Safe to call from every test: only the first call has an effect. Output is only produced
/// when the `TEST_LOG` environment variable is set, and it goes through the test writer so
/// `cargo test` captures it per test.
pub fn init_test_tracing() {
    INIT_TEST_TRACING.call_once(|| {
        if std::env::var(TEST_LOG_ENV_NAME).is_err() {
            return;
        }

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        // Another harness may have installed a subscriber already, in which case we keep it.
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init();
    });
}
