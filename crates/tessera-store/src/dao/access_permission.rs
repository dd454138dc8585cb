//! Access permission DAO

use super::{count_query, execute_query};
use crate::session::EntityManager;
use chrono::Utc;
use tessera_core::validation::{not_null, required_id};
use tessera_core::{
    AccessInfoId, AccessPermission, AccessPermissionCreator, AccessPermissionId,
    AccessPermissionQuery, ListResult, Result, TesseraError,
};

/// Stateless access permission persistence
pub struct AccessPermissionDao;

impl AccessPermissionDao {
    /// Persist a new access permission built from a creator
    ///
    /// The referenced access info is not checked here; callers that need the
    /// reference to exist check it in the same transaction.
    pub fn create(
        em: &mut dyn EntityManager,
        creator: &AccessPermissionCreator,
    ) -> Result<AccessPermission> {
        let access_permission = AccessPermission {
            id: AccessPermissionId::new(),
            scope_id: required_id(&creator.scope_id, "creator.scope_id")?,
            created_on: Utc::now(),
            access_info_id: required_id(&creator.access_info_id, "creator.access_info_id")?,
            permission: not_null(&creator.permission, "creator.permission")?.clone(),
        };
        em.persist_access_permission(access_permission.clone())?;
        Ok(access_permission)
    }

    /// Look up an access permission by id
    pub fn find(em: &dyn EntityManager, id: &AccessPermissionId) -> Option<AccessPermission> {
        em.find_access_permission(id)
    }

    /// Remove an access permission; missing ids are reported as not found
    pub fn delete(em: &mut dyn EntityManager, id: &AccessPermissionId) -> Result<AccessPermission> {
        em.remove_access_permission(id)
            .ok_or_else(|| TesseraError::not_found(AccessPermission::TYPE, id))
    }

    /// Remove every access permission granted through an access info
    pub fn delete_by_access_info_id(
        em: &mut dyn EntityManager,
        access_info_id: &AccessInfoId,
    ) -> usize {
        let ids: Vec<AccessPermissionId> = em
            .access_permissions()
            .filter(|permission| permission.access_info_id == *access_info_id)
            .map(|permission| permission.id)
            .collect();

        let mut removed = 0;
        for id in ids {
            if em.remove_access_permission(&id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Run a query
    pub fn query(
        em: &dyn EntityManager,
        query: &AccessPermissionQuery,
        max_limit: usize,
    ) -> Result<ListResult<AccessPermission>> {
        execute_query(em.access_permissions(), query, max_limit)
    }

    /// Count query matches
    pub fn count(em: &dyn EntityManager, query: &AccessPermissionQuery) -> u64 {
        count_query(em.access_permissions(), query)
    }
}
