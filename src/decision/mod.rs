//! Routing decision subsystem.
//!
//! # Data Flow
//! ```text
//! Simulation step
//!     → registry backends (&[Backend])
//!     → Apply routing policy:
//!         - engine.rs (composite health/latency/security score, argmax)
//!         - round_robin.rs (naive rotation baseline)
//!     → index of the chosen backend, or None (total outage)
//! ```
//!
//! # Design Decisions
//! - Policies only read backends; telemetry owns every mutation
//! - Disqualified backends are never chosen
//! - Ties resolve to the first backend in registry order
//! - "No eligible backend" is a value (None), not an error

pub mod engine;
pub mod round_robin;

pub use engine::{DecisionEngine, LatencyTransform};
pub use round_robin::RoundRobin;

use crate::config::validation::ValidationError;
use crate::config::{PolicyKind, ScoringConfig};
use crate::registry::Backend;

/// A strategy choosing which backend serves the next request.
pub trait RoutingPolicy: std::fmt::Debug + Send + Sync {
    /// Short name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Position of the chosen backend in `backends`, or `None` when no
    /// backend is eligible.
    fn choose(&self, backends: &[Backend]) -> Option<usize>;
}

impl<P: RoutingPolicy + ?Sized> RoutingPolicy for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn choose(&self, backends: &[Backend]) -> Option<usize> {
        (**self).choose(backends)
    }
}

/// Build the policy named by configuration.
pub fn build_policy(
    kind: PolicyKind,
    scoring: &ScoringConfig,
) -> Result<Box<dyn RoutingPolicy>, ValidationError> {
    let policy: Box<dyn RoutingPolicy> = match kind {
        PolicyKind::Composite => Box::new(DecisionEngine::new(scoring)?),
        PolicyKind::RoundRobin => Box::new(RoundRobin::new()),
    };
    Ok(policy)
}
