//! Lockstep sliding window of recent observations.

use std::collections::VecDeque;

/// Bounded latency and success histories, oldest first.
///
/// Both sequences are appended and evicted together, so they always have the
/// same length. Only the telemetry aggregator pushes into a window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleWindow {
    latencies: VecDeque<f64>,
    successes: VecDeque<bool>,
}

impl SampleWindow {
    /// Create an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of observations currently retained.
    pub fn len(&self) -> usize {
        self.latencies.len()
    }

    /// Whether nothing has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.latencies.is_empty()
    }

    /// Latency history, oldest to newest.
    pub fn latencies(&self) -> &VecDeque<f64> {
        &self.latencies
    }

    /// Success history, oldest to newest.
    pub fn successes(&self) -> &VecDeque<bool> {
        &self.successes
    }

    /// Number of successes in the window.
    pub fn success_count(&self) -> usize {
        self.successes.iter().filter(|ok| **ok).count()
    }

    /// Append one observation, evicting the oldest ones beyond `capacity`.
    pub(crate) fn push(&mut self, latency_ms: f64, success: bool, capacity: usize) {
        self.latencies.push_back(latency_ms);
        self.successes.push_back(success);
        while self.latencies.len() > capacity {
            self.latencies.pop_front();
            self.successes.pop_front();
        }
    }
}
