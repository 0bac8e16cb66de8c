//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (weights >= 0, window > 0, rates in [0, 1])
//! - Detect duplicate backend ids
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LabConfig → Result<(), Vec<ValidationError>>
//! - Component constructors reuse the per-section checks and fail fast

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{
    BackendConfig, BrownoutConfig, LabConfig, ScoringConfig, SimulationConfig, TelemetryConfig,
};
use crate::simulation::NO_BACKEND;

/// A single configuration violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A scoring weight is negative or not finite.
    #[error("weight {name} must be a non-negative finite number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    /// The latency transform scale is not a positive finite number.
    #[error("latency_scale_ms must be positive, got {0}")]
    InvalidLatencyScale(f64),

    /// Telemetry window size is zero.
    #[error("window_size must be a positive integer")]
    ZeroWindow,

    /// Backend id is empty.
    #[error("backend id must not be empty")]
    EmptyBackendId,

    /// Backend id collides with the outage marker.
    #[error("backend id {0:?} is reserved for outage outcomes")]
    ReservedBackendId(String),

    /// Two backends share an id.
    #[error("duplicate backend id: {0}")]
    DuplicateBackendId(String),

    /// A backend field is out of range.
    #[error("backend {id}: {field} out of range ({value})")]
    InvalidBackendField {
        id: String,
        field: &'static str,
        value: f64,
    },

    /// A simulation parameter is out of range.
    #[error("simulation: {field} out of range ({value})")]
    InvalidSimulationField { field: &'static str, value: f64 },

    /// Jitter bounds are inverted.
    #[error("simulation: jitter_low ({low}) exceeds jitter_high ({high})")]
    InvertedJitter { low: f64, high: f64 },

    /// Brownout fractions do not satisfy 0 <= start < end <= 1.
    #[error("brownout: window [{start}, {end}) is invalid")]
    InvalidBrownoutWindow { start: f64, end: f64 },

    /// A brownout parameter is out of range.
    #[error("brownout: {field} out of range ({value})")]
    InvalidBrownoutField { field: &'static str, value: f64 },
}

/// Validate the whole configuration, collecting every violation.
pub fn validate_config(config: &LabConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    errors.extend(scoring_errors(&config.scoring));
    if let Err(e) = check_telemetry(&config.telemetry) {
        errors.push(e);
    }
    errors.extend(simulation_errors(&config.simulation));

    let mut seen = HashSet::new();
    for backend in &config.backends {
        if let Err(e) = check_backend(backend) {
            errors.push(e);
        }
        if !seen.insert(backend.id.as_str()) {
            errors.push(ValidationError::DuplicateBackendId(backend.id.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check the scoring section, returning the first violation.
pub fn check_scoring(config: &ScoringConfig) -> Result<(), ValidationError> {
    first(scoring_errors(config))
}

/// Check the telemetry section.
pub fn check_telemetry(config: &TelemetryConfig) -> Result<(), ValidationError> {
    if config.window_size == 0 {
        return Err(ValidationError::ZeroWindow);
    }
    Ok(())
}

/// Check the outcome-model part of the simulation section.
pub fn check_outcome_model(config: &SimulationConfig) -> Result<(), ValidationError> {
    first(outcome_model_errors(config))
}

/// Check the brownout section.
pub fn check_brownout(config: &BrownoutConfig) -> Result<(), ValidationError> {
    first(brownout_errors(config))
}

/// Check a single backend definition.
pub fn check_backend(config: &BackendConfig) -> Result<(), ValidationError> {
    check_backend_values(
        &config.id,
        config.base_latency_ms,
        config.failure_rate,
        config.security_score,
        config.policy_score,
    )
}

/// Backend checks on raw values, shared by config and already-built backends.
pub(crate) fn check_backend_values(
    id: &str,
    base_latency_ms: f64,
    failure_rate: f64,
    security_score: f64,
    policy_score: f64,
) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyBackendId);
    }
    if id == NO_BACKEND {
        return Err(ValidationError::ReservedBackendId(id.to_string()));
    }

    let field_error = |field: &'static str, value: f64| ValidationError::InvalidBackendField {
        id: id.to_string(),
        field,
        value,
    };

    if !non_negative(base_latency_ms) {
        return Err(field_error("base_latency_ms", base_latency_ms));
    }
    for (field, value) in [
        ("failure_rate", failure_rate),
        ("security_score", security_score),
        ("policy_score", policy_score),
    ] {
        if !unit_interval(value) {
            return Err(field_error(field, value));
        }
    }
    Ok(())
}

fn scoring_errors(config: &ScoringConfig) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = [
        ("w_health", config.w_health),
        ("w_latency", config.w_latency),
        ("w_security", config.w_security),
    ]
    .into_iter()
    .filter(|(_, value)| !non_negative(*value))
    .map(|(name, value)| ValidationError::InvalidWeight { name, value })
    .collect();

    if !(config.latency_scale_ms.is_finite() && config.latency_scale_ms > 0.0) {
        errors.push(ValidationError::InvalidLatencyScale(config.latency_scale_ms));
    }
    errors
}

fn simulation_errors(config: &SimulationConfig) -> Vec<ValidationError> {
    let mut errors = outcome_model_errors(config);
    errors.extend(brownout_errors(&config.brownout));
    errors
}

fn outcome_model_errors(config: &SimulationConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let field_error =
        |field: &'static str, value: f64| ValidationError::InvalidSimulationField { field, value };

    if !non_negative(config.outage_latency_ms) {
        errors.push(field_error("outage_latency_ms", config.outage_latency_ms));
    }
    if !(config.failure_latency_multiplier.is_finite() && config.failure_latency_multiplier >= 1.0)
    {
        errors.push(field_error(
            "failure_latency_multiplier",
            config.failure_latency_multiplier,
        ));
    }
    if !(config.min_latency_ms.is_finite() && config.min_latency_ms > 0.0) {
        errors.push(field_error("min_latency_ms", config.min_latency_ms));
    }
    if !(config.jitter_low.is_finite() && config.jitter_low >= -1.0) {
        errors.push(field_error("jitter_low", config.jitter_low));
    }
    if !config.jitter_high.is_finite() {
        errors.push(field_error("jitter_high", config.jitter_high));
    }
    if config.jitter_low > config.jitter_high {
        errors.push(ValidationError::InvertedJitter {
            low: config.jitter_low,
            high: config.jitter_high,
        });
    }
    errors
}

fn brownout_errors(config: &BrownoutConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let (start, end) = (config.start_fraction, config.end_fraction);
    if !(unit_interval(start) && unit_interval(end) && start < end) {
        errors.push(ValidationError::InvalidBrownoutWindow { start, end });
    }
    if !unit_interval(config.failure_rate) {
        errors.push(ValidationError::InvalidBrownoutField {
            field: "failure_rate",
            value: config.failure_rate,
        });
    }
    if !(config.latency_factor.is_finite() && config.latency_factor > 0.0) {
        errors.push(ValidationError::InvalidBrownoutField {
            field: "latency_factor",
            value: config.latency_factor,
        });
    }
    errors
}

fn first(errors: Vec<ValidationError>) -> Result<(), ValidationError> {
    match errors.into_iter().next() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
