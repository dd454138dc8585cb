//! Permission-checked access services
//!
//! Every operation runs the same guard sequence: validate arguments, check the
//! caller's permission on the `access_info` domain in the relevant scope, then
//! hand the work to a DAO inside an entity session.

mod access_info;
mod access_permission;

pub use access_info::AccessInfoService;
pub use access_permission::AccessPermissionService;

use crate::config::ServiceConfig;
use crate::domains::ACCESS_INFO_DOMAIN;
use tessera_core::{Action, Permission, Query, ScopeId};

/// Query limits taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QueryLimits {
    pub(crate) max: usize,
    pub(crate) default: usize,
}

impl QueryLimits {
    pub(crate) fn from_config(config: &ServiceConfig) -> Self {
        Self {
            max: config.max_query_limit,
            default: config.default_query_limit,
        }
    }

    /// Fill in the default limit for queries that did not set one
    pub(crate) fn apply<A: Clone>(&self, query: &Query<A>) -> Query<A> {
        let mut bounded = query.clone();
        bounded.limit = Some(query.limit.unwrap_or(self.default));
        bounded
    }
}

/// Permission on the access info domain in a scope
pub(crate) fn access_info_permission(action: Action, scope_id: ScopeId) -> Permission {
    Permission::new(ACCESS_INFO_DOMAIN, action, scope_id)
}
