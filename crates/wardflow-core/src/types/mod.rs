//! # Core Type Definitions
//!
//! This module contains the record types shared by every part of the engine:
//! - Identifiers (`PatientId`)
//! - Patient records (`Patient`, `Priority`, `NewPatient`)
//! - Engine output (`MoveRecord`, `Alert`)
//! - Static reference data (`StaffMember`, `Resource`)
//! - Error types (`FlowError`)
//!
//! Field names follow the JSON shapes the dashboard front end consumes, so
//! these types serialize directly into API responses.

use crate::Stage;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier for a patient in the registry.
///
/// Assigned once at registration as `max(existing) + 1` and never reused
/// while the registry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub u64);

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// PRIORITY
// =============================================================================

/// Triage priority. `High` patients are always eligible for automatic advance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Label used in JSON and log output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// PATIENT
// =============================================================================

/// Status string for patients still queued at their current stage.
pub const STATUS_WAITING: &str = "Waiting";

/// A patient record.
///
/// Only `stage`, `priority` and `waiting_time` drive engine behavior. The
/// remaining fields are carried for the front end and never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: u32,
    pub condition: String,
    pub status: String,
    pub stage: Stage,
    pub priority: Priority,
    pub doctor_id: Option<u64>,
    pub entry_time: String,
    /// Minutes spent waiting. Never negative; every decrement saturates at 0.
    pub waiting_time: u32,
}

impl Patient {
    /// Whether this patient is still queued (as opposed to in treatment or done).
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.status == STATUS_WAITING
    }

    /// Shorten the waiting time by `minutes`, flooring at zero.
    pub fn reduce_wait(&mut self, minutes: u32) {
        self.waiting_time = self.waiting_time.saturating_sub(minutes);
    }
}

/// A patient that has not been registered yet.
///
/// The registry assigns the id on append. Defaults are applied here, once,
/// rather than on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub condition: String,
    pub status: String,
    pub stage: Stage,
    pub priority: Priority,
    pub doctor_id: Option<u64>,
    pub entry_time: String,
    pub waiting_time: u32,
}

impl NewPatient {
    /// A fresh arrival: status "Waiting", condition "General", entry "now".
    #[must_use]
    pub fn arrival(name: impl Into<String>, stage: Stage, priority: Priority) -> Self {
        Self {
            name: name.into(),
            age: 0,
            condition: "General".to_string(),
            status: STATUS_WAITING.to_string(),
            stage,
            priority,
            doctor_id: None,
            entry_time: "now".to_string(),
            waiting_time: 0,
        }
    }

    #[must_use]
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    #[must_use]
    pub fn with_waiting_time(mut self, minutes: u32) -> Self {
        self.waiting_time = minutes;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    #[must_use]
    pub fn with_doctor(mut self, doctor_id: u64) -> Self {
        self.doctor_id = Some(doctor_id);
        self
    }

    #[must_use]
    pub fn with_entry_time(mut self, entry_time: impl Into<String>) -> Self {
        self.entry_time = entry_time.into();
        self
    }

    /// Attach an id, producing a registered patient.
    #[must_use]
    pub fn register(self, id: PatientId) -> Patient {
        Patient {
            id,
            name: self.name,
            age: self.age,
            condition: self.condition,
            status: self.status,
            stage: self.stage,
            priority: self.priority,
            doctor_id: self.doctor_id,
            entry_time: self.entry_time,
            waiting_time: self.waiting_time,
        }
    }
}

// =============================================================================
// MOVE RECORD
// =============================================================================

/// One patient relocation performed by the transition engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: PatientId,
    pub from: Stage,
    pub to: Stage,
    pub priority: Priority,
}

// =============================================================================
// ALERTS
// =============================================================================

/// Severity class of an alert, as rendered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Warning,
    Danger,
    Success,
}

/// Alert identifier.
///
/// Baseline alerts are numbered; synthesized alerts are keyed by the entity
/// that triggered them (`wait-<patient>` or `load-<stage>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertId {
    Seq(u32),
    Key(String),
}

/// An operational alert. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub time: String,
}

// =============================================================================
// REFERENCE DATA
// =============================================================================

/// A member of staff shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub status: String,
    pub patients_today: u32,
}

/// A room or piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub status: String,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by the flow engine.
///
/// Business-rule mismatches (a no-op move, a stage with nowhere to send
/// patients) are not errors: policies return empty move lists instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// No patient with the given id is registered.
    #[error("Patient not found: {0}")]
    NotFound(PatientId),

    /// A stage label that is not part of the fixed stage sequence.
    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    /// A configuration value that is missing, non-integer or out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A required request field was absent.
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_wait_floors_at_zero() {
        let mut patient = NewPatient::arrival("A", Stage::Reception, Priority::Low)
            .with_waiting_time(3)
            .register(PatientId(1));
        patient.reduce_wait(10);
        assert_eq!(patient.waiting_time, 0);
    }

    #[test]
    fn arrival_defaults() {
        let patient = NewPatient::arrival("B", Stage::Screening, Priority::High)
            .register(PatientId(7));
        assert!(patient.is_waiting());
        assert_eq!(patient.condition, "General");
        assert_eq!(patient.entry_time, "now");
        assert_eq!(patient.doctor_id, None);
    }

    #[test]
    fn alert_serializes_type_field() {
        let alert = Alert {
            id: AlertId::Key("wait-3".to_string()),
            kind: AlertKind::Warning,
            message: "m".to_string(),
            time: "just now".to_string(),
        };
        let json = serde_json::to_string(&alert).expect("serialize");
        assert!(json.contains("\"type\":\"warning\""));
        assert!(json.contains("\"id\":\"wait-3\""));

        let numbered = Alert {
            id: AlertId::Seq(2),
            ..alert
        };
        let json = serde_json::to_string(&numbered).expect("serialize");
        assert!(json.contains("\"id\":2"));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            FlowError::NotFound(PatientId(9)).to_string(),
            "Patient not found: 9"
        );
        assert_eq!(
            FlowError::MissingArgument("id").to_string(),
            "Missing argument: id"
        );
    }
}
