//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Simulation subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms via the metrics facade)
//!
//! Consumers:
//!     → stderr (stdout carries the outcome stream)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured fields for backend ids and values, never formatted strings
//! - Each run gets a UUID so interleaved logs can be told apart
//! - Metrics are cheap no-ops when no recorder is installed

pub mod logging;
pub mod metrics;
