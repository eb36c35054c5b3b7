//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "CVECTOR_LOG";

/// Filter used when `CVECTOR_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "cvector_core=info";

static INIT: Once = Once::new();

/// Initialize the cvector tracing/logging system.
///
/// Reads `CVECTOR_LOG` for filter directives, e.g.
/// `CVECTOR_LOG=cvector_core::vector=debug,cvector_core::spin=trace`.
///
/// Falls back to `cvector_core=info` if `CVECTOR_LOG` is not set or is invalid.
///
/// Idempotent. Does nothing if another global subscriber is already set.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter_from_env())
            .try_init();
    });
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
