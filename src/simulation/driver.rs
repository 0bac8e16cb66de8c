//! Simulation driver.
//!
//! # Responsibilities
//! - Run the select → synthesize → telemetry loop, one step at a time
//! - Apply the brownout schedule before each step's selection
//! - Emit one outcome per step, in timestamp order

use uuid::Uuid;

use crate::config::validation::{check_brownout, ValidationError};
use crate::config::{BrownoutConfig, LabConfig};
use crate::decision::RoutingPolicy;
use crate::observability::metrics;
use crate::registry::Registry;
use crate::simulation::brownout::Brownout;
use crate::simulation::model::OutcomeModel;
use crate::simulation::Outcome;
use crate::telemetry::TelemetryAggregator;

/// Upper bound on the outcome buffer reserved up front; longer runs grow it.
const MAX_PREALLOCATED_OUTCOMES: u64 = 1 << 16;

fn outcome_capacity(steps: u64) -> usize {
    // Bounded by MAX_PREALLOCATED_OUTCOMES, so the cast cannot truncate
    steps.min(MAX_PREALLOCATED_OUTCOMES) as usize
}

/// Closed-loop routing simulation.
///
/// Owns the policy, the telemetry aggregator and the outcome model for the
/// whole run; the registry is borrowed per call.
#[derive(Debug)]
pub struct Simulation<P> {
    policy: P,
    telemetry: TelemetryAggregator,
    model: OutcomeModel,
    brownout: Option<BrownoutConfig>,
}

impl<P: RoutingPolicy> Simulation<P> {
    /// Create a simulation without a brownout.
    pub fn new(policy: P, telemetry: TelemetryAggregator, model: OutcomeModel) -> Self {
        Self {
            policy,
            telemetry,
            model,
            brownout: None,
        }
    }

    /// Build every component from configuration.
    ///
    /// A seed is drawn when the configuration does not fix one.
    pub fn from_config(policy: P, config: &LabConfig) -> Result<Self, ValidationError> {
        let seed = config.simulation.seed.unwrap_or_else(|| {
            let seed = fastrand::u64(..);
            tracing::info!(seed, "No seed configured, drew a random one");
            seed
        });

        let telemetry = TelemetryAggregator::from_config(&config.telemetry)?;
        let model = OutcomeModel::new(&config.simulation, seed)?;
        let simulation = Self::new(policy, telemetry, model);

        if config.simulation.brownout.enabled {
            simulation.with_brownout(config.simulation.brownout.clone())
        } else {
            Ok(simulation)
        }
    }

    /// Schedule a brownout of the first backend on every subsequent run.
    pub fn with_brownout(mut self, config: BrownoutConfig) -> Result<Self, ValidationError> {
        check_brownout(&config)?;
        self.brownout = Some(config);
        Ok(self)
    }

    /// The routing policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The telemetry aggregator.
    pub fn telemetry(&self) -> &TelemetryAggregator {
        &self.telemetry
    }

    /// Seed of the outcome model.
    pub fn seed(&self) -> u64 {
        self.model.seed()
    }

    /// Simulate one request at step `ts`.
    ///
    /// When no backend is eligible the step is a total outage and no backend
    /// state is touched.
    pub fn run_step(&mut self, registry: &mut Registry, ts: u64) -> Outcome {
        let Some(index) = self.policy.choose(registry.backends()) else {
            tracing::debug!(ts, "No eligible backend, simulating outage");
            let outcome = self.model.outage(ts);
            metrics::record_selection(self.policy.name(), &outcome.backend_id);
            metrics::record_outcome(&outcome);
            return outcome;
        };

        let Some(backend) = registry.at_mut(index) else {
            // Policy returned a position outside the registry
            tracing::error!(ts, index, policy = self.policy.name(), "Invalid backend index");
            return self.model.outage(ts);
        };

        let outcome = self.model.draw(backend, ts);
        self.telemetry.update(backend, &outcome);

        tracing::trace!(
            ts,
            backend = %outcome.backend_id,
            latency_ms = outcome.latency_ms,
            success = outcome.success,
            "Step complete"
        );
        metrics::record_selection(self.policy.name(), &outcome.backend_id);
        metrics::record_outcome(&outcome);
        outcome
    }

    /// Run `steps` consecutive steps starting at `ts = 0`.
    pub fn run(&mut self, registry: &mut Registry, steps: u64) -> Vec<Outcome> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("run", %run_id, policy = self.policy.name());
        let _enter = span.enter();

        // Already validated in `with_brownout`
        let mut brownout = self
            .brownout
            .as_ref()
            .and_then(|config| Brownout::schedule(config, steps).ok());

        tracing::info!(
            steps,
            seed = self.model.seed(),
            backends = registry.len(),
            brownout_start = ?brownout.as_ref().map(Brownout::start_ts),
            brownout_end = ?brownout.as_ref().map(Brownout::end_ts),
            "Simulation starting"
        );

        let mut outcomes = Vec::with_capacity(outcome_capacity(steps));
        for ts in 0..steps {
            if let Some(brownout) = brownout.as_mut() {
                brownout.on_step(ts, registry);
            }
            outcomes.push(self.run_step(registry, ts));
        }

        let failures = outcomes.iter().filter(|o| !o.success).count();
        tracing::info!(steps, failures, "Simulation complete");
        outcomes
    }
}
