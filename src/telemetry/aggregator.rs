//! Telemetry aggregation.
//!
//! # Responsibilities
//! - Record one observed outcome into a backend's window
//! - Recompute P95 latency and health score from the window
//!
//! # Design Decisions
//! - One aggregator per run, window size fixed at construction
//! - Non-finite latencies are kept in the window but ignored by the percentile
//! - Never panics for any outcome

use crate::config::validation::{check_telemetry, ValidationError};
use crate::config::TelemetryConfig;
use crate::observability::metrics;
use crate::registry::Backend;
use crate::simulation::Outcome;

/// Percentile used for observed latency.
pub const LATENCY_PERCENTILE: f64 = 95.0;

/// Turns raw outcomes into the derived features the decision engine reads.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryAggregator {
    window_size: usize,
}

impl TelemetryAggregator {
    /// Create an aggregator with the given window capacity.
    pub fn new(window_size: usize) -> Result<Self, ValidationError> {
        Self::from_config(&TelemetryConfig { window_size })
    }

    /// Create an aggregator from configuration.
    pub fn from_config(config: &TelemetryConfig) -> Result<Self, ValidationError> {
        check_telemetry(config)?;
        Ok(Self {
            window_size: config.window_size,
        })
    }

    /// Capacity of each backend's window.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Record an outcome observed for `backend` and refresh its derived scores.
    pub fn update(&self, backend: &mut Backend, outcome: &Outcome) {
        self.record(backend, outcome.latency_ms, outcome.success);
    }

    /// Record a raw latency/success observation.
    pub fn record(&self, backend: &mut Backend, latency_ms: f64, success: bool) {
        backend.window.push(latency_ms, success, self.window_size);

        if let Some(p95) = percentile(backend.window.latencies().iter().copied(), LATENCY_PERCENTILE)
        {
            if p95 >= 0.0 {
                backend.latency_obs_ms = p95;
            }
        }

        let observed = backend.window.len();
        if observed > 0 {
            backend.health_score = backend.window.success_count() as f64 / observed as f64;
        }

        tracing::trace!(
            backend = %backend.id(),
            latency_ms,
            success,
            health_score = backend.health_score,
            latency_obs_ms = backend.latency_obs_ms,
            "Telemetry updated"
        );
        metrics::record_backend_health(backend.id(), backend.health_score);
    }
}

/// Percentile of the finite values using linear interpolation between the
/// closest ranks (rank = p/100 * (n - 1)).
///
/// Returns `None` when there is no finite value.
pub fn percentile(values: impl IntoIterator<Item = f64>, p: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(latency_ms: f64, success: bool) -> Outcome {
        Outcome::served("b1", latency_ms, success, 0)
    }

    #[test]
    fn test_zero_window_rejected() {
        assert_eq!(
            TelemetryAggregator::new(0).unwrap_err(),
            ValidationError::ZeroWindow
        );
    }

    #[test]
    fn test_percentile_interpolates() {
        let values: Vec<f64> = (1..=20).map(f64::from).collect();
        // rank = 0.95 * 19 = 18.05 -> 19 + 0.05 * (20 - 19)
        let p95 = percentile(values, 95.0).unwrap();
        assert!((p95 - 19.05).abs() < 1e-9);

        assert_eq!(percentile([42.0], 95.0), Some(42.0));
        assert_eq!(percentile(Vec::new(), 95.0), None);
    }

    #[test]
    fn test_percentile_ignores_nan() {
        assert_eq!(percentile([f64::NAN, 10.0, f64::INFINITY], 95.0), Some(10.0));
    }

    #[test]
    fn test_window_capped_fifo() {
        let telemetry = TelemetryAggregator::new(5).unwrap();
        let mut b = Backend::new("b1", 100.0, 0.0);

        for i in 0..8 {
            telemetry.update(&mut b, &outcome(i as f64, true));
        }

        assert_eq!(b.window().len(), 5);
        assert_eq!(
            b.window().latencies().iter().copied().collect::<Vec<_>>(),
            vec![3.0, 4.0, 5.0, 6.0, 7.0]
        );
        assert_eq!(b.window().successes().len(), 5);
    }

    #[test]
    fn test_health_tracks_failures() {
        let telemetry = TelemetryAggregator::new(4).unwrap();
        let mut b = Backend::new("b1", 100.0, 0.0);

        telemetry.update(&mut b, &outcome(100.0, true));
        telemetry.update(&mut b, &outcome(300.0, false));
        assert!((b.health_score - 0.5).abs() < 1e-12);

        for _ in 0..4 {
            telemetry.update(&mut b, &outcome(300.0, false));
        }
        assert_eq!(b.health_score, 0.0);

        for _ in 0..4 {
            telemetry.update(&mut b, &outcome(100.0, true));
        }
        assert_eq!(b.health_score, 1.0);
    }

    #[test]
    fn test_p95_reflects_tail() {
        let telemetry = TelemetryAggregator::new(20).unwrap();
        let mut b = Backend::new("b1", 100.0, 0.0);

        for _ in 0..19 {
            telemetry.update(&mut b, &outcome(100.0, true));
        }
        telemetry.update(&mut b, &outcome(1100.0, false));

        // 100 + 0.05 * 1000
        assert!((b.latency_obs_ms - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_latency_keeps_prior_value() {
        let telemetry = TelemetryAggregator::new(3).unwrap();
        let mut b = Backend::new("b1", 100.0, 0.0);
        b.latency_obs_ms = 80.0;

        telemetry.update(&mut b, &outcome(f64::NAN, true));
        assert_eq!(b.latency_obs_ms, 80.0);
        assert_eq!(b.window().len(), 1);

        telemetry.update(&mut b, &outcome(-5.0, true));
        assert_eq!(b.latency_obs_ms, 80.0);
        assert_eq!(b.health_score, 1.0);
    }
}
