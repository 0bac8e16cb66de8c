//! Simulation subsystem.
//!
//! # Data Flow
//! ```text
//! for ts in 0..steps:
//!     brownout.rs (inject / recover on scheduled steps)
//!     → decision policy chooses a backend (or none)
//!     → model.rs synthesizes an outcome (or a fixed-penalty outage)
//!     → telemetry aggregator updates the chosen backend
//!     → outcome.rs record appended to the output stream
//! ```
//!
//! # Design Decisions
//! - Single-threaded: each step completes before the next begins
//! - Output stream is ordered by ts, contiguous, exactly `steps` long
//! - Static backend fields change only at the two brownout transitions

pub mod brownout;
pub mod driver;
pub mod model;
pub mod outcome;

pub use brownout::{Brownout, FaultPhase};
pub use driver::Simulation;
pub use model::OutcomeModel;
pub use outcome::{Outcome, NO_BACKEND};
