//! Outcome records emitted once per simulated step.

use serde::{Deserialize, Serialize};

/// Backend id reported for a step where no backend was eligible.
pub const NO_BACKEND: &str = "none";

/// Result of one synthetic request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Backend that served the request, or [`NO_BACKEND`].
    pub backend_id: String,
    /// Observed latency.
    pub latency_ms: f64,
    /// Whether the request succeeded.
    pub success: bool,
    /// Step index.
    pub ts: u64,
}

impl Outcome {
    /// Outcome of a request served by `backend_id`.
    pub fn served(backend_id: impl Into<String>, latency_ms: f64, success: bool, ts: u64) -> Self {
        Self {
            backend_id: backend_id.into(),
            latency_ms,
            success,
            ts,
        }
    }

    /// Failed outcome for a step with no eligible backend.
    pub fn outage(latency_ms: f64, ts: u64) -> Self {
        Self::served(NO_BACKEND, latency_ms, false, ts)
    }

    /// True when no backend served this step.
    pub fn is_outage(&self) -> bool {
        self.backend_id == NO_BACKEND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outage() {
        let o = Outcome::outage(1000.0, 7);
        assert!(o.is_outage());
        assert!(!o.success);
        assert_eq!(o.ts, 7);
    }

    #[test]
    fn test_json_line_shape() {
        let o = Outcome::served("b2", 231.5, true, 3);
        let line = serde_json::to_string(&o).unwrap();
        assert_eq!(
            line,
            r#"{"backend_id":"b2","latency_ms":231.5,"success":true,"ts":3}"#
        );
    }
}
