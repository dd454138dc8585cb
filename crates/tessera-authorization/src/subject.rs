//! Subject-bound authorizer
//!
//! Holds the permissions a single caller has been granted and answers
//! permission checks for that caller. One authorizer is built per caller and
//! handed to the services that act on the caller's behalf.

use crate::effects::AuthorizationEffects;
use async_trait::async_trait;
use tessera_core::{Permission, Result, UserId};
use tokio::sync::RwLock;

/// Authorizer for one caller and the permissions it holds
#[derive(Debug)]
pub struct SubjectAuthorizer {
    subject: UserId,
    held: RwLock<Vec<Permission>>,
}

impl SubjectAuthorizer {
    /// Create an authorizer for a subject holding the given permissions
    pub fn new(subject: UserId, held: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            subject,
            held: RwLock::new(held.into_iter().collect()),
        }
    }

    /// Subject the authorizer answers for
    pub fn subject(&self) -> UserId {
        self.subject
    }

    /// Add a held permission
    pub async fn grant(&self, permission: Permission) {
        let mut held = self.held.write().await;
        if !held.contains(&permission) {
            held.push(permission);
        }
    }

    /// Drop a held permission; returns whether it was held
    pub async fn revoke(&self, permission: &Permission) -> bool {
        let mut held = self.held.write().await;
        let before = held.len();
        held.retain(|existing| existing != permission);
        held.len() != before
    }

    /// Copy of the held permissions
    pub async fn held(&self) -> Vec<Permission> {
        self.held.read().await.clone()
    }
}

#[async_trait]
impl AuthorizationEffects for SubjectAuthorizer {
    async fn is_permitted(&self, permission: &Permission) -> Result<bool> {
        let held = self.held.read().await;
        let permitted = held.iter().any(|candidate| candidate.implies(permission));
        tracing::trace!(subject = %self.subject, %permission, permitted, "Permission evaluated");
        Ok(permitted)
    }
}
