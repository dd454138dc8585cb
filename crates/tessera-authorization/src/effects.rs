//! Authorization effect trait
//!
//! Services never decide on their own whether the caller may do something;
//! they ask an [`AuthorizationEffects`] handler bound to the caller.
//!
//! # Guard Position
//!
//! ```text
//! validate arguments → check_permission → PermissionValidator → session
//!                      ^^^^^^^^^^^^^^^^
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use tessera_core::{Permission, Result, TesseraError};

/// Permission checks on behalf of the current caller
#[async_trait]
pub trait AuthorizationEffects: Send + Sync {
    /// Whether the caller holds a permission implying `permission`
    async fn is_permitted(&self, permission: &Permission) -> Result<bool>;

    /// Fail with `PermissionDenied` unless the caller is permitted
    async fn check_permission(&self, permission: &Permission) -> Result<()> {
        if self.is_permitted(permission).await? {
            Ok(())
        } else {
            tracing::warn!(%permission, "Permission check failed");
            Err(TesseraError::permission_denied(permission))
        }
    }
}

#[async_trait]
impl<T: AuthorizationEffects + ?Sized> AuthorizationEffects for Arc<T> {
    async fn is_permitted(&self, permission: &Permission) -> Result<bool> {
        (**self).is_permitted(permission).await
    }

    async fn check_permission(&self, permission: &Permission) -> Result<()> {
        (**self).check_permission(permission).await
    }
}
