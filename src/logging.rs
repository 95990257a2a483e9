//! Logging setup for Mahina KV.
//!
//! The library itself only emits `tracing` events. Applications embedding the
//! store call [`init_logging`] once to install a subscriber built from a
//! [`LogConfig`].

use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogConfig;
use crate::error::{MahinaError, MahinaResult};

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level when set.
///
/// # Errors
///
/// Returns `MahinaError::Custom` if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> MahinaResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| MahinaError::Custom(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default());

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location)
                    .with_thread_names(config.thread_names),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location)
                    .with_thread_names(config.thread_names),
            )
            .try_init()
    };

    result.map_err(|e| MahinaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}
