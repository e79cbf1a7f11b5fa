//! # fleetops-core
//!
//! Deterministic domain layer for the metro fleet-management backend.
//!
//! This crate holds the typed wire records for every backend entity and the
//! derived-state computations the operator surfaces are built from:
//! - depot track inference and the ephemeral depot layout
//! - roster filters (status, outstanding job cards)
//! - dashboard KPI tiles
//! - induction ranking profiles
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same input always produces the same derivation
//! 2. **No I/O**: all network access lives in `fleetops-client`
//! 3. **Typed boundary**: every backend payload has an explicit record; no
//!    untyped JSON flows past deserialization
//!
//! ## Example
//!
//! ```rust,ignore
//! use fleetops_core::{depot::DepotLayout, model::Train};
//!
//! let trains: Vec<Train> = fetch_trains().await?;
//! let layout = DepotLayout::derive(&trains);
//! for track in &layout.tracks {
//!     println!("{}: {} trains", track.id, track.trains.len());
//! }
//! ```

pub mod depot;
pub mod induction;
pub mod kpi;
pub mod model;
pub mod roster;

// Re-export main types at crate root
pub use depot::{DepotLayout, DepotSide, Track, TrackType};
pub use induction::InductionProfile;
pub use kpi::compute_kpis;
pub use model::{
    BrandingAssignment, BrandingContract, Certificate, CertificateStatus, ChangeType,
    CleaningTask, JobCard, JobCardPriority, JobCardStatus, Kpi, ListEnvelope, Train, TrainStatus,
    TrainUpdate,
};
pub use roster::JobCardFilter;

use thiserror::Error;

/// Error for parsing wire-format enum values from user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    /// What was being parsed (e.g. "train status").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
