//! Adaptive routing lab library.
//!
//! Closed-loop simulation of score-based backend selection under a scripted
//! brownout: the decision engine picks a backend, the simulation synthesizes
//! an outcome, telemetry folds it back into the backend's scores.

pub mod config;
pub mod decision;
pub mod observability;
pub mod registry;
pub mod simulation;
pub mod telemetry;

pub use config::LabConfig;
pub use decision::{DecisionEngine, RoundRobin, RoutingPolicy};
pub use registry::{Backend, Registry};
pub use simulation::{Outcome, Simulation};
pub use telemetry::TelemetryAggregator;
