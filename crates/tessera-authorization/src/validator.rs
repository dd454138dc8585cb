//! Permission shape validation

use crate::domains::DomainRegistry;
use std::sync::Arc;
use tessera_core::validation::not_empty;
use tessera_core::{Permission, Result, TesseraError};

/// Checks that a permission names a known domain and a supported action
///
/// A permission without a domain means "any domain" and is accepted as is.
#[derive(Debug, Clone)]
pub struct PermissionValidator {
    registry: Arc<DomainRegistry>,
}

impl PermissionValidator {
    /// Create a validator over a registry
    pub fn new(registry: Arc<DomainRegistry>) -> Self {
        Self { registry }
    }

    /// Registry the validator consults
    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    /// Validate a permission's domain and action
    pub fn validate_permission(&self, permission: &Permission) -> Result<()> {
        let Some(name) = permission.domain.as_deref() else {
            return Ok(());
        };
        not_empty(name, "permission.domain")?;

        let domain = self
            .registry
            .get(name)
            .ok_or_else(|| TesseraError::illegal_argument("permission.domain", name))?;

        if let Some(action) = permission.action {
            if !domain.supports(action) {
                return Err(TesseraError::illegal_argument("permission.action", action));
            }
        }
        Ok(())
    }
}

impl Default for PermissionValidator {
    fn default() -> Self {
        Self::new(Arc::new(DomainRegistry::platform()))
    }
}
