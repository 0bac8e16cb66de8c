//! Scripted brownout of the first backend.
//!
//! # States
//! - Healthy: backend runs with its configured failure rate and latency
//! - Degraded: failure rate raised, base latency multiplied
//! - Recovered: both mutations reversed
//!
//! # State Transitions
//! ```text
//! Healthy → Degraded: ts == floor(steps * start_fraction)
//! Degraded → Recovered: ts == floor(steps * end_fraction)
//! ```
//!
//! Transitions are step-triggered, not feedback-triggered: recovery happens
//! whether or not the router noticed the fault.

use crate::config::validation::{check_brownout, ValidationError};
use crate::config::BrownoutConfig;
use crate::observability::metrics;
use crate::registry::Registry;

/// Where the brownout target currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaultPhase {
    Healthy,
    /// Degraded, remembering the values to restore on recovery.
    Degraded {
        failure_rate: f64,
        base_latency_ms: f64,
    },
    Recovered,
}

/// Brownout schedule bound to a run length.
#[derive(Debug, Clone)]
pub struct Brownout {
    start_ts: u64,
    end_ts: u64,
    failure_rate: f64,
    latency_factor: f64,
    phase: FaultPhase,
}

impl Brownout {
    /// Compute injection and recovery steps for a run of `steps` steps.
    pub fn schedule(config: &BrownoutConfig, steps: u64) -> Result<Self, ValidationError> {
        check_brownout(config)?;
        Ok(Self {
            start_ts: (steps as f64 * config.start_fraction).floor() as u64,
            end_ts: (steps as f64 * config.end_fraction).floor() as u64,
            failure_rate: config.failure_rate,
            latency_factor: config.latency_factor,
            phase: FaultPhase::Healthy,
        })
    }

    /// Step at which the fault is injected.
    pub fn start_ts(&self) -> u64 {
        self.start_ts
    }

    /// Step at which the backend recovers.
    pub fn end_ts(&self) -> u64 {
        self.end_ts
    }

    /// Current phase.
    pub fn phase(&self) -> FaultPhase {
        self.phase
    }

    /// Apply any transition scheduled for `ts` to the first backend.
    ///
    /// Must be called before the step's selection.
    pub fn on_step(&mut self, ts: u64, registry: &mut Registry) {
        let Some(target) = registry.at_mut(0) else {
            return;
        };

        if ts == self.start_ts && self.phase == FaultPhase::Healthy {
            self.phase = FaultPhase::Degraded {
                failure_rate: target.failure_rate,
                base_latency_ms: target.base_latency_ms,
            };
            target.failure_rate = self.failure_rate;
            target.base_latency_ms *= self.latency_factor;

            tracing::warn!(
                ts,
                backend = %target.id(),
                failure_rate = target.failure_rate,
                base_latency_ms = target.base_latency_ms,
                "Brownout injected"
            );
            metrics::record_fault_event("inject");
        }

        if ts == self.end_ts {
            if let FaultPhase::Degraded {
                failure_rate,
                base_latency_ms,
            } = self.phase
            {
                target.failure_rate = failure_rate;
                target.base_latency_ms = base_latency_ms;
                self.phase = FaultPhase::Recovered;

                tracing::info!(
                    ts,
                    backend = %target.id(),
                    failure_rate,
                    base_latency_ms,
                    "Brownout recovered"
                );
                metrics::record_fault_event("recover");
            }
        }
    }
}
