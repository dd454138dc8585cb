//! Access entities
//!
//! An [`AccessInfo`] ties a user to a scope; [`AccessPermission`] records hang
//! individual permission grants off it. Creators carry optional fields so an
//! incomplete request is representable and can be rejected by validation
//! rather than by the type checker at some distant call site.

use crate::query::{AttributeValue, Queryable};
use crate::{AccessInfoId, AccessPermissionId, Permission, ScopeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binding of a user to a scope that permissions are granted through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessInfo {
    /// Record identifier
    pub id: AccessInfoId,
    /// Owning scope
    pub scope_id: ScopeId,
    /// User the access info belongs to
    pub user_id: UserId,
    /// Creation time
    pub created_on: DateTime<Utc>,
}

impl AccessInfo {
    /// Entity type name used in errors
    pub const TYPE: &'static str = "accessInfo";
}

/// Request to create an [`AccessInfo`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessInfoCreator {
    /// Scope the access info will live in
    pub scope_id: Option<ScopeId>,
    /// User the access info belongs to
    pub user_id: Option<UserId>,
}

impl AccessInfoCreator {
    /// Start a creator in a scope
    pub fn new(scope_id: ScopeId) -> Self {
        Self {
            scope_id: Some(scope_id),
            user_id: None,
        }
    }

    /// Set the user
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Attributes of [`AccessInfo`] usable in queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessInfoAttribute {
    /// Record identifier
    Id,
    /// Owning scope
    ScopeId,
    /// User reference
    UserId,
    /// Creation time
    CreatedOn,
}

impl Queryable for AccessInfo {
    type Attribute = AccessInfoAttribute;

    fn scope_id(&self) -> ScopeId {
        self.scope_id
    }

    fn attribute(&self, attribute: AccessInfoAttribute) -> AttributeValue {
        match attribute {
            AccessInfoAttribute::Id => AttributeValue::id(self.id),
            AccessInfoAttribute::ScopeId => AttributeValue::id(self.scope_id),
            AccessInfoAttribute::UserId => AttributeValue::id(self.user_id),
            AccessInfoAttribute::CreatedOn => AttributeValue::Timestamp(self.created_on),
        }
    }
}

/// A single permission granted through an access info
///
/// Immutable once created; removing the grant deletes the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPermission {
    /// Record identifier
    pub id: AccessPermissionId,
    /// Owning scope
    pub scope_id: ScopeId,
    /// Creation time
    pub created_on: DateTime<Utc>,
    /// Access info the grant belongs to
    pub access_info_id: AccessInfoId,
    /// Granted permission
    pub permission: Permission,
}

impl AccessPermission {
    /// Entity type name used in errors
    pub const TYPE: &'static str = "accessPermission";
}

/// Request to create an [`AccessPermission`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPermissionCreator {
    /// Scope the grant will live in
    pub scope_id: Option<ScopeId>,
    /// Access info the grant belongs to
    pub access_info_id: Option<AccessInfoId>,
    /// Permission being granted
    pub permission: Option<Permission>,
}

impl AccessPermissionCreator {
    /// Start a creator in a scope
    pub fn new(scope_id: ScopeId) -> Self {
        Self {
            scope_id: Some(scope_id),
            ..Self::default()
        }
    }

    /// Set the access info reference
    pub fn with_access_info_id(mut self, access_info_id: AccessInfoId) -> Self {
        self.access_info_id = Some(access_info_id);
        self
    }

    /// Set the permission to grant
    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }
}

/// Attributes of [`AccessPermission`] usable in queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessPermissionAttribute {
    /// Record identifier
    Id,
    /// Owning scope
    ScopeId,
    /// Access info reference
    AccessInfoId,
    /// Domain of the granted permission
    Domain,
    /// Action of the granted permission
    Action,
    /// Target scope of the granted permission
    TargetScopeId,
    /// Creation time
    CreatedOn,
}

impl Queryable for AccessPermission {
    type Attribute = AccessPermissionAttribute;

    fn scope_id(&self) -> ScopeId {
        self.scope_id
    }

    fn attribute(&self, attribute: AccessPermissionAttribute) -> AttributeValue {
        match attribute {
            AccessPermissionAttribute::Id => AttributeValue::id(self.id),
            AccessPermissionAttribute::ScopeId => AttributeValue::id(self.scope_id),
            AccessPermissionAttribute::AccessInfoId => AttributeValue::id(self.access_info_id),
            AccessPermissionAttribute::Domain => self
                .permission
                .domain
                .as_deref()
                .map_or(AttributeValue::Absent, AttributeValue::text),
            AccessPermissionAttribute::Action => self
                .permission
                .action
                .map_or(AttributeValue::Absent, |action| {
                    AttributeValue::text(action.as_str())
                }),
            AccessPermissionAttribute::TargetScopeId => {
                AttributeValue::optional_id(self.permission.target_scope_id)
            }
            AccessPermissionAttribute::CreatedOn => AttributeValue::Timestamp(self.created_on),
        }
    }
}

/// Query over access infos
pub type AccessInfoQuery = crate::Query<AccessInfoAttribute>;

/// Query over access permissions
pub type AccessPermissionQuery = crate::Query<AccessPermissionAttribute>;
