//! Composite-score decision engine.
//!
//! ```text
//! score = w_health * health + w_latency * 1 / (latency_obs / scale + 1) + w_security * security
//! ```
//!
//! A backend failing its security or policy check scores `0.0` and is never
//! selected.

use crate::config::validation::{check_scoring, ValidationError};
use crate::config::ScoringConfig;
use crate::decision::RoutingPolicy;
use crate::registry::Backend;

/// Monotonically decreasing map from observed latency to a (0, 1] score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyTransform {
    scale_ms: f64,
}

impl LatencyTransform {
    /// `f(L) = 1 / (L / scale_ms + 1)`.
    pub fn reciprocal(scale_ms: f64) -> Self {
        Self { scale_ms }
    }

    /// Normalization constant.
    pub fn scale_ms(&self) -> f64 {
        self.scale_ms
    }

    /// Latency contribution. Negative or non-finite latency contributes zero.
    pub fn apply(&self, latency_ms: f64) -> f64 {
        if !latency_ms.is_finite() || latency_ms < 0.0 {
            return 0.0;
        }
        1.0 / (latency_ms / self.scale_ms + 1.0)
    }
}

/// Ranks backends by composite score and selects the best one.
#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine {
    w_health: f64,
    w_latency: f64,
    w_security: f64,
    latency: LatencyTransform,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        let config = ScoringConfig::default();
        Self {
            w_health: config.w_health,
            w_latency: config.w_latency,
            w_security: config.w_security,
            latency: LatencyTransform::reciprocal(config.latency_scale_ms),
        }
    }
}

impl DecisionEngine {
    /// Create an engine, rejecting negative or non-finite weights.
    pub fn new(config: &ScoringConfig) -> Result<Self, ValidationError> {
        check_scoring(config)?;
        Ok(Self {
            w_health: config.w_health,
            w_latency: config.w_latency,
            w_security: config.w_security,
            latency: LatencyTransform::reciprocal(config.latency_scale_ms),
        })
    }

    /// The latency transform in use.
    pub fn latency_transform(&self) -> LatencyTransform {
        self.latency
    }

    /// Composite score of one backend. Always finite.
    pub fn score(&self, backend: &Backend) -> f64 {
        if !backend.is_eligible() {
            return 0.0;
        }

        let score = self.w_health * unit(backend.health_score)
            + self.w_latency * self.latency.apply(backend.latency_obs_ms)
            + self.w_security * unit(backend.security_score);

        if score.is_finite() {
            score
        } else {
            0.0
        }
    }

    /// Eligible backends as `(index, score)`, best first.
    ///
    /// The sort is stable, so equal scores keep registry order.
    pub fn rank(&self, backends: &[Backend]) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = backends
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_eligible())
            .map(|(i, b)| (i, self.score(b)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Best eligible backend, or `None` when there is none.
    pub fn select<'a>(&self, backends: &'a [Backend]) -> Option<&'a Backend> {
        self.choose(backends).map(|i| &backends[i])
    }
}

impl RoutingPolicy for DecisionEngine {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn choose(&self, backends: &[Backend]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, backend) in backends.iter().enumerate() {
            if !backend.is_eligible() {
                continue;
            }
            let score = self.score(backend);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((i, score)),
            }
        }
        best.map(|(i, _)| i)
    }
}

fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
