//! Service configuration

use crate::domains::DomainRegistry;
use serde::{Deserialize, Serialize};
use tessera_core::config::{env_override, TesseraConfig};
use tessera_core::validation::not_empty;
use tessera_core::{Domain, LoggingConfig, Result, TesseraError};

/// Settings shared by the access services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Upper bound on the number of items a query may return
    pub max_query_limit: usize,
    /// Limit applied to queries that do not set one
    pub default_query_limit: usize,
    /// Domains registered on top of the platform domains
    pub extra_domains: Vec<Domain>,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_query_limit: 1000,
            default_query_limit: 100,
            extra_domains: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Platform domains plus the configured extras
    pub fn domain_registry(&self) -> DomainRegistry {
        let mut registry = DomainRegistry::platform();
        for domain in &self.extra_domains {
            registry.register(domain.clone());
        }
        registry
    }
}

impl TesseraConfig for ServiceConfig {
    fn merge_with_env(&mut self) -> Result<()> {
        if let Some(limit) = env_override("MAX_QUERY_LIMIT")? {
            self.max_query_limit = limit;
        }
        if let Some(limit) = env_override("DEFAULT_QUERY_LIMIT")? {
            self.default_query_limit = limit;
        }
        if let Some(filter) = env_override::<String>("LOG_FILTER")? {
            self.logging.filter = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.max_query_limit == 0 {
            return Err(TesseraError::config("max_query_limit must be positive"));
        }
        if self.default_query_limit == 0 || self.default_query_limit > self.max_query_limit {
            return Err(TesseraError::config(format!(
                "default_query_limit must be in 1..={}",
                self.max_query_limit
            )));
        }
        for domain in &self.extra_domains {
            not_empty(&domain.name, "extra_domains.name")
                .map_err(|e| TesseraError::config(e.to_string()))?;
            if domain.actions.is_empty() {
                return Err(TesseraError::config(format!(
                    "domain {} declares no actions",
                    domain.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::Action;

    #[test]
    fn test_defaults_validate() {
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_limit_bounded_by_max() {
        let config = ServiceConfig {
            max_query_limit: 10,
            default_query_limit: 20,
            ..ServiceConfig::default()
        };
        assert!(matches!(config.validate(), Err(TesseraError::Config { .. })));
    }

    #[test]
    fn test_extra_domains_join_registry() {
        let config = ServiceConfig {
            extra_domains: vec![Domain::new("asset", [Action::Read])],
            ..ServiceConfig::default()
        };
        let registry = config.domain_registry();
        assert!(registry.get("asset").is_some());
        assert!(registry.get("device").is_some());
    }
}
