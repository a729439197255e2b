//! Synheart Cohort - deterministic synthetic recovery-cohort data generator
//!
//! Cohort produces longitudinal patient-monitoring data (wearable biomarkers,
//! mood surveys, diary entries, chat interactions, sobriety tracking) for
//! four fictional personas over a 180-day window. Channels are coupled
//! through a shared stochastic toolkit: AR(1) persistence, two-state
//! regime-switching episodes, weekly seasonality, and a bounded
//! exponential-decay relapse-risk curve with a stochastic relapse/reset rule.
//!
//! Given a seed, output is bit-identical run-to-run; external diagnostic
//! tooling relies on recomputing the risk curve from stored records.
//!
//! ## Modules
//!
//! - **processes**: stochastic process kit (AR(1), regime switching, seasonality)
//! - **risk**: relapse-risk curve (the recomputation contract)
//! - **profile**: persona parameter tables
//! - **simulator**: the per-persona day-loop state machine
//! - **assembler**: multi-persona dataset assembly and metadata
//! - **verify**: invariant checks over generated datasets

pub mod assembler;
pub mod error;
pub mod processes;
pub mod profile;
pub mod risk;
pub mod simulator;
pub mod types;
pub mod verify;

pub use assembler::{DatasetAssembler, DEFAULT_SEED, GENERATION_METHOD};
pub use error::GenError;
pub use profile::{builtin_profiles, PersonaProfile};
pub use risk::{RiskCurve, RISK_CEILING, RISK_FLOOR};
pub use simulator::{PersonaSimulator, DEFAULT_N_DAYS};
pub use types::{Dataset, PersonaRecordSet};
pub use verify::{verify_dataset, VerifyReport};

/// Cohort version embedded in CLI output
pub const COHORT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generator name for provenance
pub const GENERATOR_NAME: &str = "synheart-cohort";
