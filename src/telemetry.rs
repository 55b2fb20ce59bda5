//! Telemetry initialization.
//!
//! Filter directives come from `FOLIO_LOG`, then `RUST_LOG`, then the
//! configured `[log] level`. Output always goes to stderr so stdout stays
//! clean for graph and JSON output:
//! - `pretty` → human-readable lines
//! - `json` → one JSON object per event, with span close timings

use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat};

/// Env var checked before `RUST_LOG`.
pub const LOG_ENV: &str = "FOLIO_LOG";

/// Install the global subscriber for the given log settings.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(config: &LogConfig) {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let filter = filter_for(config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("warning: telemetry already initialized: {e}");
    }
}

/// Build the filter: `FOLIO_LOG`, then `RUST_LOG`, then the configured level.
fn filter_for(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|e| {
            eprintln!(
                "warning: invalid log level '{}': {e}; using 'warn'",
                config.level
            );
            EnvFilter::new("warn")
        })
}
