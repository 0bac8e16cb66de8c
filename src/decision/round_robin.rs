//! Round-robin routing baseline.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::decision::RoutingPolicy;
use crate::registry::Backend;

/// Round-robin selector.
/// Rotates through eligible backends without looking at telemetry.
#[derive(Debug, Default)]
pub struct RoundRobin {
    counter: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoutingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn choose(&self, backends: &[Backend]) -> Option<usize> {
        if backends.is_empty() {
            return None;
        }

        // At most one pass over the backends
        let start = self.counter.fetch_add(1, Ordering::Relaxed);
        let len = backends.len();

        (0..len)
            .map(|i| (start + i) % len)
            .find(|&index| backends[index].is_eligible())
    }
}
