//! Access info service

use super::{access_info_permission, QueryLimits};
use crate::config::ServiceConfig;
use crate::effects::AuthorizationEffects;
use tessera_core::validation::{not_nil, required_id};
use tessera_core::{
    AccessInfo, AccessInfoAttribute, AccessInfoCreator, AccessInfoId, AccessInfoQuery, Action,
    AttributeValue, ListResult, Predicate, Result, ScopeId, TesseraError, UserId,
};
use tessera_store::{AccessInfoDao, AccessPermissionDao, EntitySession};

/// Manages the access infos that access permissions are granted through
pub struct AccessInfoService<A, S> {
    authorization: A,
    session: S,
    limits: QueryLimits,
}

impl<A, S> AccessInfoService<A, S>
where
    A: AuthorizationEffects,
    S: EntitySession,
{
    /// Create a service acting for the caller behind `authorization`
    pub fn new(authorization: A, session: S, config: &ServiceConfig) -> Self {
        Self {
            authorization,
            session,
            limits: QueryLimits::from_config(config),
        }
    }

    /// Create an access info for a user
    pub async fn create(&self, creator: AccessInfoCreator) -> Result<AccessInfo> {
        let scope_id = required_id(&creator.scope_id, "creator.scope_id")?;
        let user_id = required_id(&creator.user_id, "creator.user_id")?;

        tracing::debug!(%scope_id, %user_id, "Creating access info");

        self.authorization
            .check_permission(&access_info_permission(Action::Write, scope_id))
            .await?;

        let created = self
            .session
            .on_transacted_insert(move |em| AccessInfoDao::create(em, &creator))
            .await?;

        tracing::info!(access_info_id = %created.id, %scope_id, "Access info created");
        Ok(created)
    }

    /// Remove an access info together with every permission granted through it
    pub async fn delete(&self, scope_id: ScopeId, id: AccessInfoId) -> Result<()> {
        not_nil(scope_id, "scope_id")?;
        not_nil(id, "access_info_id")?;

        self.authorization
            .check_permission(&access_info_permission(Action::Delete, scope_id))
            .await?;

        self.session
            .on_transacted_action(move |em| {
                match AccessInfoDao::find(&*em, &id) {
                    Some(existing) if existing.scope_id == scope_id => {}
                    _ => return Err(TesseraError::not_found(AccessInfo::TYPE, id)),
                }
                let revoked = AccessPermissionDao::delete_by_access_info_id(em, &id);
                tracing::debug!(access_info_id = %id, revoked, "Revoked granted permissions");
                AccessInfoDao::delete(em, &id).map(|_| ())
            })
            .await?;

        tracing::info!(%scope_id, access_info_id = %id, "Access info deleted");
        Ok(())
    }

    /// Look up an access info in a scope
    pub async fn find(&self, scope_id: ScopeId, id: AccessInfoId) -> Result<Option<AccessInfo>> {
        not_nil(scope_id, "scope_id")?;
        not_nil(id, "access_info_id")?;

        self.authorization
            .check_permission(&access_info_permission(Action::Read, scope_id))
            .await?;

        self.session
            .on_result(move |em| {
                Ok(AccessInfoDao::find(em, &id).filter(|info| info.scope_id == scope_id))
            })
            .await
    }

    /// Look up the access info of a user in a scope
    pub async fn find_by_user_id(
        &self,
        scope_id: ScopeId,
        user_id: UserId,
    ) -> Result<Option<AccessInfo>> {
        not_nil(scope_id, "scope_id")?;
        not_nil(user_id, "user_id")?;

        let query = AccessInfoQuery::new(scope_id).with_predicate(Predicate::equals(
            AccessInfoAttribute::UserId,
            AttributeValue::id(user_id),
        ));
        Ok(self.query(&query).await?.into_iter().next())
    }

    /// Run a query within the query's scope
    pub async fn query(&self, query: &AccessInfoQuery) -> Result<ListResult<AccessInfo>> {
        let scope_id = required_id(&query.scope_id, "query.scope_id")?;

        self.authorization
            .check_permission(&access_info_permission(Action::Read, scope_id))
            .await?;

        let bounded = self.limits.apply(query);
        let max_limit = self.limits.max;
        self.session
            .on_result(move |em| AccessInfoDao::query(em, &bounded, max_limit))
            .await
    }

    /// Count the matches of a query within the query's scope
    pub async fn count(&self, query: &AccessInfoQuery) -> Result<u64> {
        let scope_id = required_id(&query.scope_id, "query.scope_id")?;

        self.authorization
            .check_permission(&access_info_permission(Action::Read, scope_id))
            .await?;

        self.session
            .on_result(move |em| Ok(AccessInfoDao::count(em, query)))
            .await
    }
}
