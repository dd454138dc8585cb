//! Entity manager and session traits
//!
//! An [`EntityManager`] is the synchronous, table-level view a DAO works
//! against. An [`EntitySession`] hands one out for the duration of a closure:
//! read-only for [`EntitySession::on_result`], inside a transaction for the
//! two `on_transacted_*` calls. A transacted closure that returns an error
//! leaves the store exactly as it was.
//!
//! # Session Flow
//!
//! ```text
//! service ──▶ on_transacted_insert(|em| { DAO::find(em) ; DAO::create(em) })
//!                 │
//!                 ├─ Ok  → commit working copy
//!                 └─ Err → discard working copy (rollback)
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use tessera_core::{AccessInfo, AccessInfoId, AccessPermission, AccessPermissionId, Result};

/// Table-level access to persisted access records
///
/// Implementations are plain data structures; transactions and locking are the
/// session's business.
pub trait EntityManager: Send + Sync {
    /// Look up an access info by id
    fn find_access_info(&self, id: &AccessInfoId) -> Option<AccessInfo>;

    /// Iterate over every access info
    fn access_infos(&self) -> Box<dyn Iterator<Item = &AccessInfo> + '_>;

    /// Insert a new access info; duplicate ids are a storage error
    fn persist_access_info(&mut self, access_info: AccessInfo) -> Result<()>;

    /// Remove an access info, returning it if it existed
    fn remove_access_info(&mut self, id: &AccessInfoId) -> Option<AccessInfo>;

    /// Look up an access permission by id
    fn find_access_permission(&self, id: &AccessPermissionId) -> Option<AccessPermission>;

    /// Iterate over every access permission
    fn access_permissions(&self) -> Box<dyn Iterator<Item = &AccessPermission> + '_>;

    /// Insert a new access permission; duplicate ids are a storage error
    fn persist_access_permission(&mut self, access_permission: AccessPermission) -> Result<()>;

    /// Remove an access permission, returning it if it existed
    fn remove_access_permission(&mut self, id: &AccessPermissionId) -> Option<AccessPermission>;
}

/// Transaction boundary around entity manager work
#[async_trait]
pub trait EntitySession: Send + Sync {
    /// Run a read-only closure against a consistent view of the store
    async fn on_result<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&dyn EntityManager) -> Result<T> + Send;

    /// Run a closure that creates entities inside a transaction
    async fn on_transacted_insert<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut dyn EntityManager) -> Result<T> + Send;

    /// Run a closure that modifies or removes entities inside a transaction
    async fn on_transacted_action<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut dyn EntityManager) -> Result<()> + Send;
}

#[async_trait]
impl<S: EntitySession> EntitySession for Arc<S> {
    async fn on_result<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&dyn EntityManager) -> Result<T> + Send,
    {
        (**self).on_result(f).await
    }

    async fn on_transacted_insert<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut dyn EntityManager) -> Result<T> + Send,
    {
        (**self).on_transacted_insert(f).await
    }

    async fn on_transacted_action<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut dyn EntityManager) -> Result<()> + Send,
    {
        (**self).on_transacted_action(f).await
    }
}
