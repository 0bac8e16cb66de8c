//! Backend registry.
//!
//! # Responsibilities
//! - Own every backend for the duration of a run (arena)
//! - Preserve configuration order (selection tie-break depends on it)
//! - Provide index-by-id lookup

use std::collections::HashMap;

use crate::config::validation::ValidationError;
use crate::config::BackendConfig;
use crate::registry::backend::Backend;

/// Ordered set of backends with id lookup.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    backends: Vec<Backend>,
    /// Map of backend id -> position in `backends`.
    index: HashMap<String, usize>,
}

impl Registry {
    /// Create a registry from already-built backends.
    ///
    /// Fails if a backend has out-of-range fields or two backends share an id.
    pub fn new(backends: Vec<Backend>) -> Result<Self, ValidationError> {
        let mut index = HashMap::with_capacity(backends.len());
        for (i, backend) in backends.iter().enumerate() {
            backend.validate()?;
            if index.insert(backend.id().to_string(), i).is_some() {
                return Err(ValidationError::DuplicateBackendId(backend.id().to_string()));
            }
        }
        Ok(Self { backends, index })
    }

    /// Create a registry from configuration.
    pub fn from_configs(configs: &[BackendConfig]) -> Result<Self, ValidationError> {
        let backends = configs
            .iter()
            .map(Backend::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        let registry = Self::new(backends)?;

        let eligible = registry.backends.iter().filter(|b| b.is_eligible()).count();
        tracing::debug!(
            backends = registry.len(),
            eligible,
            "Backend registry created"
        );
        if eligible == 0 {
            tracing::warn!("No eligible backends in registry; every step will be an outage");
        }
        Ok(registry)
    }

    /// All backends, in registry order.
    pub fn backends(&self) -> &[Backend] {
        &self.backends
    }

    /// Number of backends.
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Position of the backend with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Look up a backend by id.
    pub fn get(&self, id: &str) -> Option<&Backend> {
        self.index_of(id).map(|i| &self.backends[i])
    }

    /// Look up a backend by id for mutation.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Backend> {
        let i = self.index_of(id)?;
        self.backends.get_mut(i)
    }

    /// Backend at a registry position.
    pub fn at(&self, index: usize) -> Option<&Backend> {
        self.backends.get(index)
    }

    /// Backend at a registry position, for mutation.
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Backend> {
        self.backends.get_mut(index)
    }

    /// Iterate over backends in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Backend> + '_ {
        self.backends.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let registry = Registry::from_configs(&[
            BackendConfig::new("b1", 200.0, 0.01),
            BackendConfig::new("b2", 220.0, 0.01),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.index_of("b2"), Some(1));
        assert_eq!(registry.get("b1").map(|b| b.base_latency_ms), Some(200.0));
        assert!(registry.get("b9").is_none());
    }

    #[test]
    fn test_order_preserved() {
        let registry = Registry::new(vec![
            Backend::new("z", 1.0, 0.0),
            Backend::new("a", 1.0, 0.0),
        ])
        .unwrap();
        let ids: Vec<_> = registry.iter().map(|b| b.id()).collect();
        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = Registry::new(vec![
            Backend::new("b1", 1.0, 0.0),
            Backend::new("b1", 2.0, 0.0),
        ])
        .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateBackendId("b1".into()));
    }

    #[test]
    fn test_invalid_backend_rejected() {
        let err = Registry::new(vec![Backend::new("b", -5.0, 2.0)]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidBackendField { field: "base_latency_ms", .. }
        ));

        let err = Registry::new(vec![
            Backend::new("b1", 200.0, 0.0),
            Backend::new("b2", 220.0, 2.0),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidBackendField { field: "failure_rate", .. }
        ));
    }

    #[test]
    fn test_outage_marker_id_rejected() {
        let err = Registry::new(vec![Backend::new("none", 50.0, 0.0)]).unwrap_err();
        assert_eq!(err, ValidationError::ReservedBackendId("none".into()));
    }

    #[test]
    fn test_get_mut() {
        let mut registry = Registry::new(vec![Backend::new("b1", 200.0, 0.01)]).unwrap();
        if let Some(b) = registry.get_mut("b1") {
            b.failure_rate = 0.9;
        }
        assert_eq!(registry.at(0).map(|b| b.failure_rate), Some(0.9));
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::from_configs(&[]).unwrap();
        assert!(registry.is_empty());
    }
}
