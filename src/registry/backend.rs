//! Backend abstraction.
//!
//! # Responsibilities
//! - Represent a single routable target
//! - Hold static attributes used by the outcome model
//! - Hold telemetry-derived scores read by the decision engine
//! - Enforce hard disqualification (security/policy flags)

use crate::config::validation::{check_backend, check_backend_values, ValidationError};
use crate::config::BackendConfig;
use crate::telemetry::SampleWindow;

/// A single candidate backend.
#[derive(Debug, Clone)]
pub struct Backend {
    /// Stable identifier.
    id: String,

    /// Nominal latency used by the outcome model.
    pub base_latency_ms: f64,
    /// Probability that a request fails.
    pub failure_rate: f64,

    /// Security check passed.
    pub security_ok: bool,
    /// Policy check passed.
    pub policy_ok: bool,

    /// Success ratio over the current window (1.0 before any observation).
    pub health_score: f64,
    /// P95 latency over the current window (0.0 before any observation).
    pub latency_obs_ms: f64,
    /// Static security score in [0, 1].
    pub security_score: f64,
    /// Static policy score in [0, 1].
    pub policy_score: f64,

    pub(crate) window: SampleWindow,
}

impl Backend {
    /// Create a healthy, eligible backend with default derived fields.
    pub fn new(id: impl Into<String>, base_latency_ms: f64, failure_rate: f64) -> Self {
        Self {
            id: id.into(),
            base_latency_ms,
            failure_rate,
            security_ok: true,
            policy_ok: true,
            health_score: 1.0,
            latency_obs_ms: 0.0,
            security_score: 1.0,
            policy_score: 1.0,
            window: SampleWindow::new(),
        }
    }

    /// Build a backend from validated configuration.
    pub fn from_config(config: &BackendConfig) -> Result<Self, ValidationError> {
        check_backend(config)?;
        Ok(Self {
            security_ok: config.security_ok,
            policy_ok: config.policy_ok,
            security_score: config.security_score,
            policy_score: config.policy_score,
            ..Self::new(config.id.clone(), config.base_latency_ms, config.failure_rate)
        })
    }

    /// Check the static fields: id not empty or reserved, latency
    /// non-negative, rates and scores in [0, 1].
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_backend_values(
            &self.id,
            self.base_latency_ms,
            self.failure_rate,
            self.security_score,
            self.policy_score,
        )
    }

    /// The backend's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// False when a security or policy check failed.
    pub fn is_eligible(&self) -> bool {
        self.security_ok && self.policy_ok
    }

    /// Recent observations recorded by telemetry.
    pub fn window(&self) -> &SampleWindow {
        &self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let b = Backend::new("b1", 200.0, 0.01);
        assert_eq!(b.id(), "b1");
        assert_eq!(b.health_score, 1.0);
        assert_eq!(b.latency_obs_ms, 0.0);
        assert!(b.is_eligible());
        assert!(b.window().is_empty());
    }

    #[test]
    fn test_from_config_flags() {
        let mut config = BackendConfig::new("b3", 180.0, 0.01);
        config.security_ok = false;
        config.security_score = 0.5;

        let b = Backend::from_config(&config).unwrap();
        assert!(!b.is_eligible());
        assert_eq!(b.security_score, 0.5);
        assert_eq!(b.base_latency_ms, 180.0);
    }

    #[test]
    fn test_from_config_rejects_bad_rate() {
        let config = BackendConfig::new("b1", 200.0, -0.2);
        assert!(Backend::from_config(&config).is_err());
    }

    #[test]
    fn test_validate_hand_built() {
        assert!(Backend::new("b1", 200.0, 0.01).validate().is_ok());

        let err = Backend::new("b", -5.0, 2.0).validate().unwrap_err();
        assert!(err.to_string().contains("base_latency_ms"));

        let mut b = Backend::new("b2", 220.0, 0.01);
        b.security_score = f64::NAN;
        assert!(b.validate().is_err());
    }
}
