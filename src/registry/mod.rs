//! Backend registry subsystem.
//!
//! # Data Flow
//! ```text
//! BackendConfig list
//!     → backend.rs (validate, build Backend with default derived fields)
//!     → pool.rs (ordered arena + id index)
//!     → owned by the simulation driver for one run
//!         - decision engine reads derived fields (&[Backend])
//!         - telemetry aggregator mutates one backend per step (&mut Backend)
//!         - brownout mutates static fields of the first backend
//! ```
//!
//! # Design Decisions
//! - Registry order is the selection tie-break order
//! - Components borrow backends for a single call and never retain them
//! - Disqualification is a flag check, not a score penalty

pub mod backend;
pub mod pool;

pub use backend::Backend;
pub use pool::Registry;
