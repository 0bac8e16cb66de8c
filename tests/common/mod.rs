//! Shared utilities for integration tests.

use adaptive_router::config::{BrownoutConfig, SimulationConfig};
use adaptive_router::simulation::OutcomeModel;
use adaptive_router::{Backend, Outcome, Registry, RoutingPolicy, Simulation, TelemetryAggregator};

/// The reference trio: 200/220/250 ms, 1% failure rate.
pub fn reference_registry() -> Registry {
    Registry::new(vec![
        Backend::new("b1", 200.0, 0.01),
        Backend::new("b2", 220.0, 0.01),
        Backend::new("b3", 250.0, 0.01),
    ])
    .unwrap()
}

/// Simulation with default outcome model, window 20 and the default brownout
/// (failure rate 0.90, latency x3, 30% → 60% of the run).
pub fn brownout_simulation<P: RoutingPolicy>(policy: P, seed: u64) -> Simulation<P> {
    let telemetry = TelemetryAggregator::new(20).unwrap();
    let model = OutcomeModel::new(&SimulationConfig::default(), seed).unwrap();
    Simulation::new(policy, telemetry, model)
        .with_brownout(BrownoutConfig::default())
        .unwrap()
}

/// Fraction of outcomes in `range` served by `backend_id`.
#[allow(dead_code)]
pub fn share(outcomes: &[Outcome], range: std::ops::Range<usize>, backend_id: &str) -> f64 {
    let len = range.len();
    let hits = outcomes[range]
        .iter()
        .filter(|o| o.backend_id == backend_id)
        .count();
    hits as f64 / len as f64
}

/// Successes / total.
#[allow(dead_code)]
pub fn availability(outcomes: &[Outcome]) -> f64 {
    let ok = outcomes.iter().filter(|o| o.success).count();
    ok as f64 / outcomes.len() as f64
}
