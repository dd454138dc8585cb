//! Domain registry
//!
//! The set of domains a permission may name, with the actions each supports.
//! The default registry carries the platform domains; deployments add their
//! own through [`ServiceConfig::extra_domains`](crate::ServiceConfig).

use std::collections::BTreeMap;
use tessera_core::{Action, Domain};

/// Domain protecting access infos and the permissions granted through them
pub const ACCESS_INFO_DOMAIN: &str = "access_info";

/// Known domains, keyed by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRegistry {
    domains: BTreeMap<String, Domain>,
}

impl DomainRegistry {
    /// Registry with no domains at all
    pub fn empty() -> Self {
        Self {
            domains: BTreeMap::new(),
        }
    }

    /// Registry with the platform domains
    pub fn platform() -> Self {
        use Action::{Connect, Delete, Execute, Read, Write};

        let mut registry = Self::empty();
        for domain in [
            Domain::new(ACCESS_INFO_DOMAIN, [Read, Write, Delete]),
            Domain::new("access_token", [Read, Write, Delete]),
            Domain::new("account", [Read, Write, Delete]),
            Domain::new("credential", [Read, Write, Delete]),
            Domain::new("device", [Read, Write, Delete, Connect, Execute]),
            Domain::new("device_event", [Read, Write, Delete]),
            Domain::new("domain", [Read, Write, Delete]),
            Domain::new("group", [Read, Write, Delete]),
            Domain::new("role", [Read, Write, Delete]),
            Domain::new("user", [Read, Write, Delete]),
        ] {
            registry.register(domain);
        }
        registry
    }

    /// Add a domain, replacing any existing domain with the same name
    pub fn register(&mut self, domain: Domain) {
        self.domains.insert(domain.name.clone(), domain);
    }

    /// Look up a domain by name
    pub fn get(&self, name: &str) -> Option<&Domain> {
        self.domains.get(name)
    }

    /// Iterate over registered domains in name order
    pub fn iter(&self) -> impl Iterator<Item = &Domain> {
        self.domains.values()
    }

    /// Number of registered domains
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// True if no domains are registered
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::platform()
    }
}
