//! Metrics collection.
//!
//! # Metrics
//! - `router_selections_total` (counter): selections by policy, backend
//! - `router_outcomes_total` (counter): outcomes by backend, result
//! - `router_outcome_latency_ms` (histogram): synthesized latency by backend
//! - `router_backend_health` (gauge): windowed success ratio by backend
//! - `router_fault_events_total` (counter): brownout transitions by kind
//!
//! No recorder is installed here; without one every call is a no-op.

use crate::simulation::Outcome;

/// Record which backend a policy chose ("none" for an outage).
pub fn record_selection(policy: &'static str, backend: &str) {
    metrics::counter!(
        "router_selections_total",
        "policy" => policy,
        "backend" => backend.to_string()
    )
    .increment(1);
}

/// Record the result and latency of one step.
pub fn record_outcome(outcome: &Outcome) {
    let result = if outcome.success { "success" } else { "failure" };
    metrics::counter!(
        "router_outcomes_total",
        "backend" => outcome.backend_id.clone(),
        "result" => result
    )
    .increment(1);
    metrics::histogram!("router_outcome_latency_ms", "backend" => outcome.backend_id.clone())
        .record(outcome.latency_ms);
}

/// Record a backend's current health score.
pub fn record_backend_health(backend: &str, health_score: f64) {
    metrics::gauge!("router_backend_health", "backend" => backend.to_string()).set(health_score);
}

/// Record a brownout transition ("inject" or "recover").
pub fn record_fault_event(kind: &'static str) {
    metrics::counter!("router_fault_events_total", "kind" => kind).increment(1);
}
