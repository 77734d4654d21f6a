//! # wardflow-core
//!
//! The patient-flow engine for the Wardflow hospital operations dashboard.
//!
//! Patients move through a fixed sequence of stages (Reception → Screening →
//! Imaging → Consultation → Surgery → Treatment → Pharmacy → Discharge). This
//! crate models that journey in memory:
//!
//! - `stage`: the ordered stage topology
//! - `registry` / `distribution`: the patient list and the per-stage counts
//!   kept alongside it
//! - `transition`: automatic advance, manual move and auto-balance
//! - `alerts`: the derived alert feed
//! - `control`: flow mode and auto-balance tunables
//! - `simulation`: randomized dashboard metrics and simulation ticks
//! - `hospital`: the state container tying it all together
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no persistence: state lives as long as a `Hospital`
//! - All randomness flows through an injected `RngCore`
//! - Policies report business-rule mismatches as empty results, not errors

// =============================================================================
// MODULES
// =============================================================================

pub mod alerts;
pub mod control;
pub mod distribution;
pub mod hospital;
pub mod primitives;
pub mod registry;
pub mod seed;
pub mod simulation;
pub mod stage;
pub mod transition;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Alert, AlertId, AlertKind, FlowError, MoveRecord, NewPatient, Patient, PatientId, Priority,
    Resource, STATUS_WAITING, StaffMember,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use alerts::generate_alerts;
pub use control::{AutoBalanceConfig, ConfigUpdate, FlowControl};
pub use distribution::Distribution;
pub use hospital::{BalanceOutcome, Hospital, Overview, SharedRng};
pub use registry::PatientRegistry;
pub use simulation::{DashboardMetrics, DistributionView, TickReport, WaitTimes};
pub use stage::{STAGE_ORDER, Stage, index_of, next_of};
pub use transition::TransitionEngine;
