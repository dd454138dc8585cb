//! Access permission service

use super::{access_info_permission, QueryLimits};
use crate::config::ServiceConfig;
use crate::effects::AuthorizationEffects;
use crate::validator::PermissionValidator;
use std::sync::Arc;
use tessera_core::validation::{not_null, not_nil, required_id};
use tessera_core::{
    AccessInfo, AccessInfoId, AccessPermission, AccessPermissionAttribute,
    AccessPermissionCreator, AccessPermissionId, AccessPermissionQuery, Action, AttributeValue,
    ListResult, Predicate, Result, ScopeId, SortOrder, TesseraError,
};
use tessera_store::{AccessInfoDao, AccessPermissionDao, EntitySession};

/// Grants, revokes, and lists individual access permissions
///
/// Generic over the caller's authorizer and the entity session so tests and
/// deployments can plug in their own.
pub struct AccessPermissionService<A, S> {
    authorization: A,
    session: S,
    validator: PermissionValidator,
    limits: QueryLimits,
}

impl<A, S> AccessPermissionService<A, S>
where
    A: AuthorizationEffects,
    S: EntitySession,
{
    /// Create a service acting for the caller behind `authorization`
    pub fn new(authorization: A, session: S, config: &ServiceConfig) -> Self {
        Self {
            authorization,
            session,
            validator: PermissionValidator::new(Arc::new(config.domain_registry())),
            limits: QueryLimits::from_config(config),
        }
    }

    /// Grant a permission through an existing access info
    ///
    /// The caller needs `access_info:write` in the creator's scope. Granting a
    /// permission that targets any other scope, or no scope at all, also
    /// requires the caller to hold that permission itself.
    pub async fn create(&self, creator: AccessPermissionCreator) -> Result<AccessPermission> {
        let scope_id = required_id(&creator.scope_id, "creator.scope_id")?;
        let access_info_id = required_id(&creator.access_info_id, "creator.access_info_id")?;
        let permission = not_null(&creator.permission, "creator.permission")?;

        tracing::debug!(%scope_id, %access_info_id, %permission, "Creating access permission");

        self.authorization
            .check_permission(&access_info_permission(Action::Write, scope_id))
            .await?;

        if permission.target_scope_id != Some(scope_id) {
            self.authorization.check_permission(permission).await?;
        }

        self.validator.validate_permission(permission)?;

        let created = self
            .session
            .on_transacted_insert(move |em| {
                if AccessInfoDao::find(&*em, &access_info_id).is_none() {
                    return Err(TesseraError::not_found(AccessInfo::TYPE, access_info_id));
                }
                AccessPermissionDao::create(em, &creator)
            })
            .await?;

        tracing::info!(
            access_permission_id = %created.id,
            %scope_id,
            permission = %created.permission,
            "Access permission created"
        );
        Ok(created)
    }

    /// Remove an access permission
    pub async fn delete(&self, scope_id: ScopeId, id: AccessPermissionId) -> Result<()> {
        not_nil(scope_id, "scope_id")?;
        not_nil(id, "access_permission_id")?;

        tracing::debug!(%scope_id, access_permission_id = %id, "Deleting access permission");

        self.authorization
            .check_permission(&access_info_permission(Action::Delete, scope_id))
            .await?;

        self.session
            .on_transacted_action(move |em| {
                match AccessPermissionDao::find(&*em, &id) {
                    Some(existing) if existing.scope_id == scope_id => {}
                    _ => return Err(TesseraError::not_found(AccessPermission::TYPE, id)),
                }
                AccessPermissionDao::delete(em, &id).map(|_| ())
            })
            .await?;

        tracing::info!(%scope_id, access_permission_id = %id, "Access permission deleted");
        Ok(())
    }

    /// Look up an access permission in a scope
    pub async fn find(
        &self,
        scope_id: ScopeId,
        id: AccessPermissionId,
    ) -> Result<Option<AccessPermission>> {
        not_nil(scope_id, "scope_id")?;
        not_nil(id, "access_permission_id")?;

        self.authorization
            .check_permission(&access_info_permission(Action::Read, scope_id))
            .await?;

        self.session
            .on_result(move |em| {
                Ok(AccessPermissionDao::find(em, &id)
                    .filter(|permission| permission.scope_id == scope_id))
            })
            .await
    }

    /// List every permission granted through an access info
    ///
    /// Unlike [`query`](Self::query) the result is never truncated: pages of
    /// `max_query_limit` items are read under one session view until the last
    /// one, and `limit_exceeded` is always false.
    pub async fn find_by_access_info_id(
        &self,
        scope_id: ScopeId,
        access_info_id: AccessInfoId,
    ) -> Result<ListResult<AccessPermission>> {
        not_nil(scope_id, "scope_id")?;
        not_nil(access_info_id, "access_info_id")?;

        self.authorization
            .check_permission(&access_info_permission(Action::Read, scope_id))
            .await?;

        let page_size = self.limits.max;
        let mut page = AccessPermissionQuery::new(scope_id)
            .with_predicate(Predicate::equals(
                AccessPermissionAttribute::AccessInfoId,
                AttributeValue::id(access_info_id),
            ))
            .with_sort(AccessPermissionAttribute::Id, SortOrder::Ascending)
            .with_limit(page_size);

        self.session
            .on_result(move |em| {
                let mut items = Vec::new();
                loop {
                    let result = AccessPermissionDao::query(em, &page, page_size)?;
                    let more = result.limit_exceeded;
                    items.extend(result);
                    if !more {
                        break;
                    }
                    page.offset += page_size;
                }
                Ok(ListResult {
                    items,
                    limit_exceeded: false,
                })
            })
            .await
    }

    /// Run a query within the query's scope
    pub async fn query(
        &self,
        query: &AccessPermissionQuery,
    ) -> Result<ListResult<AccessPermission>> {
        let scope_id = required_id(&query.scope_id, "query.scope_id")?;

        self.authorization
            .check_permission(&access_info_permission(Action::Read, scope_id))
            .await?;

        let bounded = self.limits.apply(query);
        let max_limit = self.limits.max;
        self.session
            .on_result(move |em| AccessPermissionDao::query(em, &bounded, max_limit))
            .await
    }

    /// Count the matches of a query within the query's scope
    pub async fn count(&self, query: &AccessPermissionQuery) -> Result<u64> {
        let scope_id = required_id(&query.scope_id, "query.scope_id")?;

        self.authorization
            .check_permission(&access_info_permission(Action::Read, scope_id))
            .await?;

        self.session
            .on_result(move |em| Ok(AccessPermissionDao::count(em, query)))
            .await
    }
}
