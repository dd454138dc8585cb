//! # Tessera Authorization - Guarded Access Services
//!
//! Services that attach, remove, and query access permissions and the access
//! infos they hang off. Each operation validates its arguments, asks the
//! caller's [`AuthorizationEffects`] handler for the permission it needs, and
//! delegates persistence to DAOs inside an entity session.
//!
//! ```rust,ignore
//! use tessera_authorization::{AccessPermissionService, ServiceConfig, SubjectAuthorizer};
//! use tessera_store::MemorySession;
//!
//! let caller = Arc::new(SubjectAuthorizer::new(user_id, held_permissions));
//! let service = AccessPermissionService::new(caller, MemorySession::new(), &ServiceConfig::default());
//! let granted = service.create(creator).await?;
//! ```

#![forbid(unsafe_code)]

/// Service configuration
pub mod config;

/// Domain registry
pub mod domains;

/// Authorization effect trait
pub mod effects;

/// Access services
pub mod service;

/// Subject-bound authorizer
pub mod subject;

/// Permission shape validation
pub mod validator;

pub use config::ServiceConfig;
pub use domains::{DomainRegistry, ACCESS_INFO_DOMAIN};
pub use effects::AuthorizationEffects;
pub use service::{AccessInfoService, AccessPermissionService};
pub use subject::SubjectAuthorizer;
pub use validator::PermissionValidator;
