//! # Tessera Store - Entity Persistence
//!
//! Entity manager and session seams plus the DAOs the services use. The
//! in-memory session is a complete transactional backend suitable for tests
//! and single-process deployments.

#![forbid(unsafe_code)]

/// Stateless data-access objects
pub mod dao;

/// In-memory transactional backend
pub mod memory;

/// Entity manager and session traits
pub mod session;

pub use dao::{AccessInfoDao, AccessPermissionDao};
pub use memory::{MemoryEntityTables, MemorySession};
pub use session::{EntityManager, EntitySession};
