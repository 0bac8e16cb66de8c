//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LabConfig (validated, immutable)
//!     → sections handed to registry, telemetry, decision and simulation
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a run never re-reads it
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::BackendConfig;
pub use schema::BrownoutConfig;
pub use schema::LabConfig;
pub use schema::ObservabilityConfig;
pub use schema::PolicyKind;
pub use schema::ScoringConfig;
pub use schema::SimulationConfig;
pub use schema::TelemetryConfig;
pub use validation::{validate_config, ValidationError};
