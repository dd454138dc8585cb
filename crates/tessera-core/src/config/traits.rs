//! Core configuration traits for the Tessera configuration system

use crate::{Result, TesseraError};
use std::path::Path;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "TESSERA_";

/// Core trait for Tessera configuration types
///
/// Configuration is layered: defaults, then an optional file, then
/// environment overrides, then validation.
pub trait TesseraConfig: Clone + Default + Send + Sync + serde::de::DeserializeOwned + 'static {
    /// Load configuration from a TOML or JSON file, chosen by extension
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TesseraError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(TesseraError::config(format!(
                "Unsupported config file format: {}",
                path.display()
            ))),
        }
    }

    /// Apply `TESSERA_*` environment overrides
    fn merge_with_env(&mut self) -> Result<()>;

    /// Validate the configuration
    fn validate(&self) -> Result<()>;

    /// Defaults, optional file, environment, validation
    fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }
}

/// Read and parse an environment override, if set
pub fn env_override<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let name = format!("{ENV_PREFIX}{key}");
    match std::env::var(&name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| TesseraError::config(format!("Invalid value in {name}: {e}"))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(TesseraError::config(format!("Unreadable {name}: {e}"))),
    }
}
