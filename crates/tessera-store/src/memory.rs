//! In-memory entity session
//!
//! Tables live behind a `tokio::sync::RwLock`. Transactions take the write
//! lock, run the closure against a working copy, and swap the copy in only
//! when the closure succeeds, so a failed closure never leaves partial writes.

use crate::session::{EntityManager, EntitySession};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tessera_core::{
    AccessInfo, AccessInfoId, AccessPermission, AccessPermissionId, Result, TesseraError,
};
use tokio::sync::RwLock;

/// Plain in-memory tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryEntityTables {
    access_infos: BTreeMap<AccessInfoId, AccessInfo>,
    access_permissions: BTreeMap<AccessPermissionId, AccessPermission>,
}

impl MemoryEntityTables {
    /// Number of stored access infos
    pub fn access_info_count(&self) -> usize {
        self.access_infos.len()
    }

    /// Number of stored access permissions
    pub fn access_permission_count(&self) -> usize {
        self.access_permissions.len()
    }
}

impl EntityManager for MemoryEntityTables {
    fn find_access_info(&self, id: &AccessInfoId) -> Option<AccessInfo> {
        self.access_infos.get(id).cloned()
    }

    fn access_infos(&self) -> Box<dyn Iterator<Item = &AccessInfo> + '_> {
        Box::new(self.access_infos.values())
    }

    fn persist_access_info(&mut self, access_info: AccessInfo) -> Result<()> {
        if self.access_infos.contains_key(&access_info.id) {
            return Err(TesseraError::storage(format!(
                "Duplicate {} id {}",
                AccessInfo::TYPE,
                access_info.id
            )));
        }
        self.access_infos.insert(access_info.id, access_info);
        Ok(())
    }

    fn remove_access_info(&mut self, id: &AccessInfoId) -> Option<AccessInfo> {
        self.access_infos.remove(id)
    }

    fn find_access_permission(&self, id: &AccessPermissionId) -> Option<AccessPermission> {
        self.access_permissions.get(id).cloned()
    }

    fn access_permissions(&self) -> Box<dyn Iterator<Item = &AccessPermission> + '_> {
        Box::new(self.access_permissions.values())
    }

    fn persist_access_permission(&mut self, access_permission: AccessPermission) -> Result<()> {
        if self.access_permissions.contains_key(&access_permission.id) {
            return Err(TesseraError::storage(format!(
                "Duplicate {} id {}",
                AccessPermission::TYPE,
                access_permission.id
            )));
        }
        self.access_permissions
            .insert(access_permission.id, access_permission);
        Ok(())
    }

    fn remove_access_permission(&mut self, id: &AccessPermissionId) -> Option<AccessPermission> {
        self.access_permissions.remove(id)
    }
}

/// Shared in-memory session
///
/// Clones share the same tables, so every service built from clones of one
/// session sees the same data.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    tables: Arc<RwLock<MemoryEntityTables>>,
}

impl MemorySession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current tables
    pub async fn snapshot(&self) -> MemoryEntityTables {
        self.tables.read().await.clone()
    }

    async fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut dyn EntityManager) -> Result<T>,
    {
        let mut tables = self.tables.write().await;
        let mut working = tables.clone();
        match f(&mut working) {
            Ok(value) => {
                *tables = working;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(error = %err, "Transaction rolled back");
                Err(err)
            }
        }
    }
}

#[async_trait]
impl EntitySession for MemorySession {
    async fn on_result<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&dyn EntityManager) -> Result<T> + Send,
    {
        let tables = self.tables.read().await;
        f(&*tables)
    }

    async fn on_transacted_insert<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce(&mut dyn EntityManager) -> Result<T> + Send,
    {
        self.transact(f).await
    }

    async fn on_transacted_action<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut dyn EntityManager) -> Result<()> + Send,
    {
        self.transact(f).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tessera_core::{ScopeId, UserId};

    fn access_info() -> AccessInfo {
        AccessInfo {
            id: AccessInfoId::new(),
            scope_id: ScopeId::new(),
            user_id: UserId::new(),
            created_on: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_commit_on_success() {
        let session = MemorySession::new();
        let info = access_info();
        let id = info.id;

        session
            .on_transacted_insert(move |em| em.persist_access_info(info))
            .await
            .unwrap();

        let found = session
            .on_result(move |em| Ok(em.find_access_info(&id)))
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_rollback_on_error() {
        let session = MemorySession::new();
        let before = session.snapshot().await;

        let result = session
            .on_transacted_action(|em| {
                em.persist_access_info(access_info())?;
                Err(TesseraError::internal("abort"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(session.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let session = MemorySession::new();
        let info = access_info();
        let duplicate = info.clone();

        let result = session
            .on_transacted_insert(move |em| {
                em.persist_access_info(info)?;
                em.persist_access_info(duplicate)
            })
            .await;

        assert!(matches!(result, Err(TesseraError::Storage { .. })));
        assert_eq!(session.snapshot().await.access_info_count(), 0);
    }
}
