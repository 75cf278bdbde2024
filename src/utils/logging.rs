//! Tracing subscriber setup for binaries

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("tracing subscriber already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies globally and
/// this crate logs at debug.
pub fn init_logging(default_level: &str) -> Result<(), LoggingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("{},lake_mapper=debug", default_level))?,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;
    Ok(())
}
