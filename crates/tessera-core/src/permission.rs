//! Permission values
//!
//! A [`Permission`] is the `(domain, action, target scope)` triple that
//! describes an allowed operation. Any component may be absent, which reads as
//! "any": a subject holding `access_info:*:*` may do anything with access
//! infos in every scope.
//!
//! The canonical textual form is `domain:action:target_scope`, with `*`
//! standing in for an absent component.

use crate::{Identifier, ScopeId, TesseraError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Wildcard used in the textual form of a permission
pub const WILDCARD: &str = "*";

/// Operations a permission can allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read or list entities
    Read,
    /// Create or update entities
    Write,
    /// Remove entities
    Delete,
    /// Open a connection on behalf of an entity
    Connect,
    /// Run a command against an entity
    Execute,
}

impl Action {
    /// Every action, in declaration order
    pub const ALL: [Action; 5] = [
        Action::Read,
        Action::Write,
        Action::Delete,
        Action::Connect,
        Action::Execute,
    ];

    /// Get string representation of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Delete => "delete",
            Action::Connect => "connect",
            Action::Execute => "execute",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = TesseraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| TesseraError::illegal_argument("permission.action", s))
    }
}

/// A named category of protected resources and the actions it supports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain name as used in permissions, e.g. `access_info`
    pub name: String,
    /// Actions that may be granted on this domain
    pub actions: BTreeSet<Action>,
}

impl Domain {
    /// Create a domain supporting the given actions
    pub fn new(name: impl Into<String>, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            name: name.into(),
            actions: actions.into_iter().collect(),
        }
    }

    /// Check whether the domain supports an action
    pub fn supports(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

/// `(domain, action, target scope)` triple describing an allowed operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Permission {
    /// Domain the permission applies to; `None` means any domain
    pub domain: Option<String>,
    /// Action the permission allows; `None` means any action
    pub action: Option<Action>,
    /// Scope the permission applies in; `None` means any scope
    pub target_scope_id: Option<ScopeId>,
}

impl Permission {
    /// Create a fully specified permission
    pub fn new(domain: impl Into<String>, action: Action, target_scope_id: ScopeId) -> Self {
        Self {
            domain: Some(domain.into()),
            action: Some(action),
            target_scope_id: Some(target_scope_id),
        }
    }

    /// The permission that allows everything everywhere
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to a domain
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Restrict to an action
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Restrict to a target scope
    pub fn with_target_scope(mut self, target_scope_id: ScopeId) -> Self {
        self.target_scope_id = Some(target_scope_id);
        self
    }

    /// Check whether holding `self` is enough to be granted `requested`
    ///
    /// Each component of `self` either matches anything (when absent) or must
    /// equal the requested component. A requested wildcard is only implied by a
    /// held wildcard.
    pub fn implies(&self, requested: &Permission) -> bool {
        fn covers<T: PartialEq>(held: &Option<T>, requested: &Option<T>) -> bool {
            match held {
                None => true,
                Some(value) => requested.as_ref() == Some(value),
            }
        }

        covers(&self.domain, &requested.domain)
            && covers(&self.action, &requested.action)
            && covers(&self.target_scope_id, &requested.target_scope_id)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let domain = self.domain.as_deref().unwrap_or(WILDCARD);
        let action = self.action.map_or(WILDCARD, |action| action.as_str());
        match self.target_scope_id {
            Some(scope) => write!(f, "{domain}:{action}:{}", scope.uuid()),
            None => write!(f, "{domain}:{action}:{WILDCARD}"),
        }
    }
}

impl FromStr for Permission {
    type Err = TesseraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(domain), Some(action), Some(scope), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TesseraError::illegal_argument("permission", s));
        };

        let domain = match domain {
            WILDCARD => None,
            "" => return Err(TesseraError::illegal_argument("permission.domain", s)),
            name => Some(name.to_string()),
        };
        let action = match action {
            WILDCARD => None,
            name => Some(name.parse()?),
        };
        let target_scope_id = match scope {
            WILDCARD => None,
            raw => Some(
                raw.parse::<ScopeId>()
                    .map_err(|_| TesseraError::illegal_argument("permission.target_scope_id", raw))?,
            ),
        };

        Ok(Self {
            domain,
            action,
            target_scope_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scope(seed: u8) -> ScopeId {
        ScopeId::from_uuid(Uuid::from_bytes([seed; 16]))
    }

    #[test]
    fn test_wildcards_imply_specific() {
        let held = Permission::any().with_domain("access_info");
        assert!(held.implies(&Permission::new("access_info", Action::Write, scope(1))));
        assert!(!held.implies(&Permission::new("user", Action::Write, scope(1))));
    }

    #[test]
    fn test_specific_does_not_imply_wildcard() {
        let held = Permission::new("access_info", Action::Read, scope(1));
        let requested = Permission::any().with_domain("access_info").with_action(Action::Read);
        assert!(!held.implies(&requested));
    }

    #[test]
    fn test_textual_form() {
        let permission = Permission::new("device", Action::Connect, scope(3));
        let text = permission.to_string();
        assert_eq!(text, format!("device:connect:{}", scope(3).uuid()));
        assert_eq!(text.parse::<Permission>().unwrap(), permission);
        assert_eq!("*:*:*".parse::<Permission>().unwrap(), Permission::any());
    }

    #[test]
    fn test_rejects_malformed_text() {
        assert!("device:connect".parse::<Permission>().is_err());
        assert!("device:fly:*".parse::<Permission>().is_err());
        assert!(":read:*".parse::<Permission>().is_err());
    }
}
