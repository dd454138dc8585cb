//! # Tessera Core - Foundation Types
//!
//! Identifiers, permission values, the access entity model, the query model,
//! argument validation, configuration traits, and the unified error type.
//!
//! Nothing in this crate performs I/O beyond reading configuration files; the
//! store and authorization crates build on these types.

#![forbid(unsafe_code)]

/// Access info and access permission entities
pub mod access;

/// Layered configuration traits
pub mod config;

/// Unified error handling
pub mod errors;

/// UUID-backed identifiers
pub mod identifiers;

/// Tracing subscriber bootstrap
pub mod logging;

/// Permission, action, and domain values
pub mod permission;

/// Query predicates, sorting, and result pages
pub mod query;

/// Argument validation helpers
pub mod validation;

pub use access::{
    AccessInfo, AccessInfoAttribute, AccessInfoCreator, AccessInfoQuery, AccessPermission,
    AccessPermissionAttribute, AccessPermissionCreator, AccessPermissionQuery,
};
pub use config::TesseraConfig;
pub use errors::{Result, TesseraError};
pub use identifiers::{AccessInfoId, AccessPermissionId, Identifier, ScopeId, UserId};
pub use logging::LoggingConfig;
pub use permission::{Action, Domain, Permission};
pub use query::{AttributeValue, ListResult, Predicate, Query, Queryable, SortOrder};
