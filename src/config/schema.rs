//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a routing lab run.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the routing lab.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LabConfig {
    /// Simulation driver settings (steps, seed, outcome model, brownout).
    pub simulation: SimulationConfig,

    /// Composite score weights.
    pub scoring: ScoringConfig,

    /// Sliding-window telemetry settings.
    pub telemetry: TelemetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Candidate backend definitions, in registry order.
    pub backends: Vec<BackendConfig>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            scoring: ScoringConfig::default(),
            telemetry: TelemetryConfig::default(),
            observability: ObservabilityConfig::default(),
            backends: vec![
                BackendConfig::new("b1", 200.0, 0.01),
                BackendConfig::new("b2", 220.0, 0.01),
                BackendConfig::new("b3", 250.0, 0.01),
            ],
        }
    }
}

/// Which routing policy drives the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Composite health/latency/security score.
    #[default]
    Composite,
    /// Naive rotation that ignores telemetry.
    RoundRobin,
}

/// Simulation driver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of steps (synthetic requests) per run.
    pub steps: u64,

    /// RNG seed. A random seed is drawn (and logged) when absent.
    pub seed: Option<u64>,

    /// Routing policy.
    pub policy: PolicyKind,

    /// Latency reported for a step where no backend was eligible.
    pub outage_latency_ms: f64,

    /// Latency multiplier applied to failed requests (timeout/retry cost).
    pub failure_latency_multiplier: f64,

    /// Floor for synthesized latencies.
    pub min_latency_ms: f64,

    /// Lower bound of the jitter fraction applied to base latency.
    pub jitter_low: f64,

    /// Upper bound of the jitter fraction applied to base latency.
    pub jitter_high: f64,

    /// Scripted degradation of the first backend.
    pub brownout: BrownoutConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 1000,
            seed: None,
            policy: PolicyKind::Composite,
            outage_latency_ms: 1000.0,
            failure_latency_multiplier: 3.0,
            min_latency_ms: 1.0,
            jitter_low: -0.1,
            jitter_high: 0.3,
            brownout: BrownoutConfig::default(),
        }
    }
}

/// Brownout (fault injection + recovery) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrownoutConfig {
    /// Enable the scripted brownout.
    pub enabled: bool,

    /// Fraction of the run at which the fault is injected.
    pub start_fraction: f64,

    /// Fraction of the run at which the backend recovers.
    pub end_fraction: f64,

    /// Failure rate while degraded.
    pub failure_rate: f64,

    /// Base latency multiplier while degraded.
    pub latency_factor: f64,
}

impl Default for BrownoutConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start_fraction: 0.3,
            end_fraction: 0.6,
            failure_rate: 0.90,
            latency_factor: 3.0,
        }
    }
}

/// Decision engine weights.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the health score (success ratio).
    pub w_health: f64,

    /// Weight of the latency term.
    pub w_latency: f64,

    /// Weight of the security score.
    pub w_security: f64,

    /// Normalization constant of the latency transform `1 / (L / scale + 1)`.
    pub latency_scale_ms: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            w_health: 0.4,
            w_latency: 0.4,
            w_security: 0.2,
            latency_scale_ms: 100.0,
        }
    }
}

/// Telemetry aggregator configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Capacity of the latency and success windows.
    pub window_size: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { window_size: 20 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Backend definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Unique backend identifier.
    pub id: String,

    /// Nominal latency used by the outcome model.
    pub base_latency_ms: f64,

    /// Probability that a request to this backend fails.
    pub failure_rate: f64,

    /// Security check passed. `false` disqualifies the backend.
    #[serde(default = "default_true")]
    pub security_ok: bool,

    /// Policy check passed. `false` disqualifies the backend.
    #[serde(default = "default_true")]
    pub policy_ok: bool,

    /// Static security score in [0, 1].
    #[serde(default = "default_score")]
    pub security_score: f64,

    /// Static policy score in [0, 1].
    #[serde(default = "default_score")]
    pub policy_score: f64,
}

impl BackendConfig {
    /// Backend passing every check, with default scores.
    pub fn new(id: impl Into<String>, base_latency_ms: f64, failure_rate: f64) -> Self {
        Self {
            id: id.into(),
            base_latency_ms,
            failure_rate,
            security_ok: true,
            policy_ok: true,
            security_score: default_score(),
            policy_score: default_score(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_score() -> f64 {
    1.0
}
