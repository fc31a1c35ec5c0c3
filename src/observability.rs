//! Logging subscriber initialisation.
//!
//! The library only emits `tracing` events; programs embedding it call
//! [`init_logging`] once at start-up to print them.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Filter from `RUST_LOG` if set, otherwise `level` for this crate and `warn` elsewhere.
pub fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,grandstand={level}")))
}

/// Install a compact stderr subscriber.
///
/// # Errors
///
/// Returns [`ObservabilityError::TracingSubscriber`] if a global subscriber
/// is already installed.
pub fn init_logging(level: &str) -> Result<(), ObservabilityError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(build_env_filter(level))
        .try_init()?;

    Ok(())
}
