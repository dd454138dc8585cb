//! Deterministic identifiers, subjects, and a wired-up harness

use std::sync::Arc;
use tessera_authorization::{
    AccessInfoService, AccessPermissionService, ServiceConfig, SubjectAuthorizer,
    ACCESS_INFO_DOMAIN,
};
use tessera_core::{
    AccessInfo, AccessInfoCreator, AccessPermission, AccessPermissionCreator, Permission, ScopeId,
    UserId,
};
use tessera_store::{AccessInfoDao, AccessPermissionDao, EntitySession, MemorySession};
use uuid::Uuid;

/// Scope with a predictable id
pub fn scope(seed: u8) -> ScopeId {
    ScopeId::from_uuid(Uuid::from_bytes([seed; 16]))
}

/// User with a predictable id
pub fn user(seed: u8) -> UserId {
    UserId::from_uuid(Uuid::from_bytes([seed.wrapping_add(128); 16]))
}

/// Subject holding exactly the given permissions
pub fn subject_with(permissions: impl IntoIterator<Item = Permission>) -> Arc<SubjectAuthorizer> {
    Arc::new(SubjectAuthorizer::new(UserId::new(), permissions))
}

/// Subject allowed every access info action in one scope
pub fn scope_admin(scope_id: ScopeId) -> Arc<SubjectAuthorizer> {
    subject_with([Permission::any()
        .with_domain(ACCESS_INFO_DOMAIN)
        .with_target_scope(scope_id)])
}

/// Subject allowed everything everywhere
pub fn root() -> Arc<SubjectAuthorizer> {
    subject_with([Permission::any()])
}

/// Services wired to a shared in-memory session
#[derive(Debug, Clone, Default)]
pub struct TestHarness {
    /// Session every service built by the harness shares
    pub session: MemorySession,
    /// Configuration handed to the services
    pub config: ServiceConfig,
}

impl TestHarness {
    /// Harness with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Harness with custom configuration
    pub fn with_config(config: ServiceConfig) -> Self {
        Self {
            session: MemorySession::new(),
            config,
        }
    }

    /// Access permission service acting for `subject`
    pub fn access_permission_service(
        &self,
        subject: Arc<SubjectAuthorizer>,
    ) -> AccessPermissionService<Arc<SubjectAuthorizer>, MemorySession> {
        AccessPermissionService::new(subject, self.session.clone(), &self.config)
    }

    /// Access info service acting for `subject`
    pub fn access_info_service(
        &self,
        subject: Arc<SubjectAuthorizer>,
    ) -> AccessInfoService<Arc<SubjectAuthorizer>, MemorySession> {
        AccessInfoService::new(subject, self.session.clone(), &self.config)
    }

    /// Insert an access info directly, bypassing authorization
    pub async fn seed_access_info(&self, scope_id: ScopeId, user_id: UserId) -> AccessInfo {
        let creator = AccessInfoCreator::new(scope_id).with_user_id(user_id);
        self.session
            .on_transacted_insert(move |em| AccessInfoDao::create(em, &creator))
            .await
            .expect("seed access info")
    }

    /// Insert an access permission directly, bypassing authorization
    pub async fn seed_access_permission(
        &self,
        access_info: &AccessInfo,
        permission: Permission,
    ) -> AccessPermission {
        let creator = AccessPermissionCreator::new(access_info.scope_id)
            .with_access_info_id(access_info.id)
            .with_permission(permission);
        self.session
            .on_transacted_insert(move |em| AccessPermissionDao::create(em, &creator))
            .await
            .expect("seed access permission")
    }

    /// Number of stored access permissions
    pub async fn access_permission_count(&self) -> usize {
        self.session.snapshot().await.access_permission_count()
    }

    /// Number of stored access infos
    pub async fn access_info_count(&self) -> usize {
        self.session.snapshot().await.access_info_count()
    }
}
