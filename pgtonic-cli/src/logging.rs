// Logging for the pgtonic binary, powered by tracing-subscriber.
//
// The library logs through the `log` facade; the subscriber's `tracing-log`
// bridge captures those records so one filter governs everything.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable holding the filter directives, e.g. `pgtonic=debug`
pub const LOG_ENV: &str = "PGTONIC_LOG";

const DEFAULT_LEVEL: &str = "warn";

fn build_env_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid {} '{}': {}", LOG_ENV, directives, e);
            EnvFilter::new(DEFAULT_LEVEL)
        }),
        Err(_) => EnvFilter::new(DEFAULT_LEVEL),
    }
}

/// Install a stderr subscriber filtered by `PGTONIC_LOG` (default `warn`).
pub fn init_logging() {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(build_env_filter());

    // try_init also installs the log bridge; it only fails if a subscriber
    // is already set, in which case that one keeps working
    if tracing_subscriber::registry()
        .with(stderr_layer)
        .try_init()
        .is_err()
    {
        log::debug!("a global subscriber was already installed");
    }
}
