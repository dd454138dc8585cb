//! Tessera Testing Infrastructure
//!
//! Fixtures and instrumented handlers shared by the workspace's tests:
//! deterministic identifiers, a harness that wires services to one in-memory
//! session, an authorizer that records the checks it answers, and a session
//! wrapper that counts calls.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tessera_testkit::*;
//!
//! #[tokio::test]
//! async fn grants_are_listed() {
//!     let harness = TestHarness::new();
//!     let scope = scope(1);
//!     let info = harness.seed_access_info(scope, user(1)).await;
//!     let service = harness.access_permission_service(scope_admin(scope));
//!     // ...
//! }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod instrumented;

pub use fixtures::*;
pub use instrumented::{CountingSession, RecordingAuthorizer};
