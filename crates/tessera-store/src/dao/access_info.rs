//! Access info DAO

use super::{count_query, execute_query};
use crate::session::EntityManager;
use chrono::Utc;
use tessera_core::validation::required_id;
use tessera_core::{
    AccessInfo, AccessInfoCreator, AccessInfoId, AccessInfoQuery, ListResult, Result,
    TesseraError,
};

/// Stateless access info persistence
pub struct AccessInfoDao;

impl AccessInfoDao {
    /// Persist a new access info built from a creator
    pub fn create(em: &mut dyn EntityManager, creator: &AccessInfoCreator) -> Result<AccessInfo> {
        let access_info = AccessInfo {
            id: AccessInfoId::new(),
            scope_id: required_id(&creator.scope_id, "creator.scope_id")?,
            user_id: required_id(&creator.user_id, "creator.user_id")?,
            created_on: Utc::now(),
        };
        em.persist_access_info(access_info.clone())?;
        Ok(access_info)
    }

    /// Look up an access info by id
    pub fn find(em: &dyn EntityManager, id: &AccessInfoId) -> Option<AccessInfo> {
        em.find_access_info(id)
    }

    /// Remove an access info; missing ids are reported as not found
    pub fn delete(em: &mut dyn EntityManager, id: &AccessInfoId) -> Result<AccessInfo> {
        em.remove_access_info(id)
            .ok_or_else(|| TesseraError::not_found(AccessInfo::TYPE, id))
    }

    /// Run a query
    pub fn query(
        em: &dyn EntityManager,
        query: &AccessInfoQuery,
        max_limit: usize,
    ) -> Result<ListResult<AccessInfo>> {
        execute_query(em.access_infos(), query, max_limit)
    }

    /// Count query matches
    pub fn count(em: &dyn EntityManager, query: &AccessInfoQuery) -> u64 {
        count_query(em.access_infos(), query)
    }
}
