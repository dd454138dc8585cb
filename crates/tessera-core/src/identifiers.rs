//! Identifier types used across Tessera
//!
//! Every entity is keyed by a UUID newtype. The nil UUID plays the part of a
//! missing identifier and is rejected by argument validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Common behaviour of UUID-backed identifiers
pub trait Identifier: Copy + fmt::Display {
    /// Get the inner UUID
    fn uuid(&self) -> Uuid;

    /// True if this is the nil identifier
    fn is_nil(&self) -> bool {
        self.uuid().is_nil()
    }
}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from a UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The nil identifier, used where no value was supplied
            pub fn nil() -> Self {
                Self(Uuid::nil())
            }
        }

        impl Identifier for $name {
            fn uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(raw).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_identifier!(
    /// Tenant or organizational boundary that owns entities
    ScopeId,
    "scope"
);

uuid_identifier!(
    /// Platform user an access info belongs to
    UserId,
    "user"
);

uuid_identifier!(
    /// Identifier of an access info record
    AccessInfoId,
    "access-info"
);

uuid_identifier!(
    /// Identifier of an access permission record
    AccessPermissionId,
    "access-permission"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let scope = ScopeId::from_uuid(Uuid::from_bytes([7u8; 16]));
        let rendered = scope.to_string();
        assert!(rendered.starts_with("scope-"));
        assert_eq!(rendered.parse::<ScopeId>().unwrap(), scope);
        assert_eq!(scope.uuid().to_string().parse::<ScopeId>().unwrap(), scope);
    }

    #[test]
    fn test_nil_detection() {
        assert!(AccessInfoId::nil().is_nil());
        assert!(!AccessInfoId::new().is_nil());
    }
}
