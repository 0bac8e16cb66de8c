//! Telemetry subsystem.
//!
//! # Data Flow
//! ```text
//! Outcome observed for backend X
//!     → aggregator.rs
//!         → window.rs (append latency + success, evict oldest beyond capacity)
//!         → recompute latency_obs_ms (P95 over latency window)
//!         → recompute health_score (successes / window length)
//!     → Backend X derived fields ready for the next selection
//! ```
//!
//! # Design Decisions
//! - Bounded windows give the scores a finite memory, so a recovered
//!   backend can "forget" its fault once it is observed again
//! - Latency and success windows are pushed together (same length always)
//! - Telemetry is per-backend; only the selected backend is updated per step

pub mod aggregator;
pub mod window;

pub use aggregator::{percentile, TelemetryAggregator, LATENCY_PERCENTILE};
pub use window::SampleWindow;
