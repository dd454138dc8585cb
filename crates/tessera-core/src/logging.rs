//! Tracing subscriber bootstrap

use crate::{Result, TesseraError};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Logging settings shared by every Tessera service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Include the event target in formatted output
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            with_target: false,
        }
    }
}

/// Parse the filter `RUST_LOG` or the configuration asks for
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            TesseraError::config(format!("Invalid log filter {:?}: {e}", config.filter))
        }),
    }
}

/// Install the global fmt subscriber
///
/// A subscriber that is already installed is left in place.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init();
    Ok(())
}
