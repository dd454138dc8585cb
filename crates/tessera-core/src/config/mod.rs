//! Layered configuration: defaults, file, environment

pub mod traits;

pub use traits::{env_override, TesseraConfig, ENV_PREFIX};
