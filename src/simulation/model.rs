//! Synthetic outcome model.
//!
//! # Responsibilities
//! - Draw success/failure as a Bernoulli trial on the backend's failure rate
//! - Draw latency as base latency plus bounded jitter, floored
//! - Amplify latency on failure (timeout/retry cost)
//!
//! # Design Decisions
//! - Seeded `StdRng` owned by the model, so a seed reproduces a run
//! - Success is drawn before jitter on every served step

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::validation::{check_outcome_model, ValidationError};
use crate::config::SimulationConfig;
use crate::registry::Backend;
use crate::simulation::Outcome;

/// Stochastic generator of request outcomes.
#[derive(Debug, Clone)]
pub struct OutcomeModel {
    rng: StdRng,
    seed: u64,
    outage_latency_ms: f64,
    failure_multiplier: f64,
    min_latency_ms: f64,
    jitter_low: f64,
    jitter_high: f64,
}

impl OutcomeModel {
    /// Create a model from the simulation section and a seed.
    pub fn new(config: &SimulationConfig, seed: u64) -> Result<Self, ValidationError> {
        check_outcome_model(config)?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            outage_latency_ms: config.outage_latency_ms,
            failure_multiplier: config.failure_latency_multiplier,
            min_latency_ms: config.min_latency_ms,
            jitter_low: config.jitter_low,
            jitter_high: config.jitter_high,
        })
    }

    /// Seed the model was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fixed-penalty outcome for a step with no eligible backend.
    pub fn outage(&self, ts: u64) -> Outcome {
        Outcome::outage(self.outage_latency_ms, ts)
    }

    /// Synthesize the outcome of one request to `backend`.
    pub fn draw(&mut self, backend: &Backend, ts: u64) -> Outcome {
        let success = self.rng.gen::<f64>() > backend.failure_rate;

        let jitter = self.rng.gen_range(self.jitter_low..=self.jitter_high) * backend.base_latency_ms;
        let mut latency_ms = (backend.base_latency_ms + jitter).max(self.min_latency_ms);

        if !success {
            latency_ms *= self.failure_multiplier;
        }

        Outcome::served(backend.id(), latency_ms, success, ts)
    }
}
