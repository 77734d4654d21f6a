//! # Stage Topology
//!
//! The fixed, ordered journey every patient follows through the facility.
//!
//! | Position | Stage | Notes |
//! |----------|-------|-------|
//! | 0 | Reception | Entry point for new arrivals |
//! | 1 | Screening | Entry point for new arrivals |
//! | 2 | Imaging | |
//! | 3 | Consultation | |
//! | 4 | Surgery | |
//! | 5 | Treatment | |
//! | 6 | Pharmacy | |
//! | 7 | Discharge | Terminal: nothing leaves it automatically |
//!
//! Automatic advance only ever moves a patient to [`Stage::next`]. Manual
//! moves and auto-balance may jump to any stage.

use crate::FlowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of stages in the journey.
pub const STAGE_COUNT: usize = 8;

// =============================================================================
// STAGE ENUM
// =============================================================================

/// A step in the patient journey. Declaration order is journey order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Reception,
    Screening,
    Imaging,
    Consultation,
    Surgery,
    Treatment,
    Pharmacy,
    Discharge,
}

/// All stages in journey order.
pub const STAGE_ORDER: [Stage; STAGE_COUNT] = [
    Stage::Reception,
    Stage::Screening,
    Stage::Imaging,
    Stage::Consultation,
    Stage::Surgery,
    Stage::Treatment,
    Stage::Pharmacy,
    Stage::Discharge,
];

impl Stage {
    /// Get the stage name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Reception => "Reception",
            Stage::Screening => "Screening",
            Stage::Imaging => "Imaging",
            Stage::Consultation => "Consultation",
            Stage::Surgery => "Surgery",
            Stage::Treatment => "Treatment",
            Stage::Pharmacy => "Pharmacy",
            Stage::Discharge => "Discharge",
        }
    }

    /// Position of this stage in [`STAGE_ORDER`].
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Get the next stage, if any.
    #[must_use]
    pub fn next(&self) -> Option<Stage> {
        STAGE_ORDER.get(self.index() + 1).copied()
    }

    /// Check if this stage is terminal (Discharge).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGE_ORDER
            .iter()
            .find(|stage| stage.name() == s)
            .copied()
            .ok_or_else(|| FlowError::InvalidStage(s.to_string()))
    }
}

// =============================================================================
// TOPOLOGY QUERIES
// =============================================================================

/// Position of a stage label in the journey.
///
/// Fails with [`FlowError::InvalidStage`] for labels outside the sequence.
pub fn index_of(label: &str) -> Result<usize, FlowError> {
    label.parse::<Stage>().map(|stage| stage.index())
}

/// The stage following `stage`, or `None` at the terminal stage.
#[must_use]
pub fn next_of(stage: Stage) -> Option<Stage> {
    stage.next()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ordering_matches_journey() {
        for pair in STAGE_ORDER.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(next_of(pair[0]), Some(pair[1]));
        }
    }

    #[test]
    fn discharge_is_terminal() {
        assert!(Stage::Discharge.is_terminal());
        assert_eq!(next_of(Stage::Discharge), None);
        assert!(!Stage::Pharmacy.is_terminal());
    }

    #[test]
    fn index_of_known_and_unknown_labels() {
        assert_eq!(index_of("Reception"), Ok(0));
        assert_eq!(index_of("Discharge"), Ok(7));
        assert_eq!(
            index_of("Cafeteria"),
            Err(FlowError::InvalidStage("Cafeteria".to_string()))
        );
        // Labels are case-sensitive, matching the front end.
        assert!(index_of("reception").is_err());
    }

    #[test]
    fn stage_serializes_as_name() {
        let json = serde_json::to_string(&Stage::Consultation).expect("serialize");
        assert_eq!(json, "\"Consultation\"");
    }
}
