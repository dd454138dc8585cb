//! Unified error system for Tessera
//!
//! A single error type shared by every crate in the workspace. Services never
//! invent their own error hierarchies; they pick the variant that describes the
//! failure and attach a message or the offending value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error type for all Tessera operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum TesseraError {
    /// A required argument was missing or nil
    #[error("Illegal null argument: {argument}")]
    IllegalNullArgument {
        /// Dotted path of the missing argument
        argument: String,
    },

    /// An argument was present but not acceptable
    #[error("Illegal argument {argument}: {value}")]
    IllegalArgument {
        /// Dotted path of the rejected argument
        argument: String,
        /// Rendering of the rejected value
        value: String,
    },

    /// A referenced entity does not exist
    #[error("Entity not found: {entity_type} {id}")]
    NotFound {
        /// Entity type name, e.g. `accessInfo`
        entity_type: String,
        /// Identifier that was looked up
        id: String,
    },

    /// The caller does not hold the required permission
    #[error("Permission denied: {permission}")]
    PermissionDenied {
        /// Canonical form of the permission that was checked
        permission: String,
    },

    /// Storage operation failed
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl TesseraError {
    /// Create an illegal null argument error
    pub fn null_argument(argument: impl Into<String>) -> Self {
        Self::IllegalNullArgument {
            argument: argument.into(),
        }
    }

    /// Create an illegal argument error
    pub fn illegal_argument(argument: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::IllegalArgument {
            argument: argument.into(),
            value: value.to_string(),
        }
    }

    /// Create an entity not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(permission: impl fmt::Display) -> Self {
        Self::PermissionDenied {
            permission: permission.to_string(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for both null and illegal argument failures
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::IllegalNullArgument { .. } | Self::IllegalArgument { .. }
        )
    }

    /// True when a referenced entity was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when the authorizer rejected the call
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

/// Standard Result type for Tessera operations
pub type Result<T> = std::result::Result<T, TesseraError>;

impl From<std::io::Error> for TesseraError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::config(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<toml::de::Error> for TesseraError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("Invalid TOML: {err}"))
    }
}

impl From<serde_json::Error> for TesseraError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(format!("Invalid JSON: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = TesseraError::null_argument("creator.scope_id");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Illegal null argument: creator.scope_id");
    }

    #[test]
    fn test_not_found_rendering() {
        let err = TesseraError::not_found("accessInfo", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: accessInfo 42");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let err = TesseraError::from(io_err);
        assert!(matches!(err, TesseraError::Config { .. }));
    }
}
