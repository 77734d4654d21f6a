//! # Flow-Mode Controller
//!
//! The automatic/manual toggle and the auto-balance tunables.
//!
//! Auto-balance only runs while the mode is automatic. Configuration updates
//! are partial (absent fields keep their value) and all-or-nothing: if any
//! present field is invalid, nothing changes.

use crate::FlowError;
use crate::primitives::{DEFAULT_CROWD_THRESHOLD, DEFAULT_MAX_MOVES_PER_STAGE};
use serde::{Deserialize, Serialize};

// =============================================================================
// AUTO-BALANCE CONFIGURATION
// =============================================================================

/// Tunables for the auto-balance policy. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoBalanceConfig {
    /// Occupancy at which a stage counts as crowded.
    pub crowd_threshold: u32,
    /// Cap on patients moved out of one crowded stage per pass.
    pub max_moves_per_stage: u32,
}

impl Default for AutoBalanceConfig {
    fn default() -> Self {
        Self {
            crowd_threshold: DEFAULT_CROWD_THRESHOLD,
            max_moves_per_stage: DEFAULT_MAX_MOVES_PER_STAGE,
        }
    }
}

impl AutoBalanceConfig {
    /// Create a validated configuration.
    pub fn new(crowd_threshold: i64, max_moves_per_stage: i64) -> Result<Self, FlowError> {
        Ok(Self {
            crowd_threshold: validate_positive("crowd_threshold", crowd_threshold)?,
            max_moves_per_stage: validate_positive("max_moves_per_stage", max_moves_per_stage)?,
        })
    }
}

/// A partial configuration update. `None` leaves the field unchanged.
///
/// An absent field deserializes to `None`; a field present with anything
/// other than an integer (including `null`) is a deserialization error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default, deserialize_with = "present_integer")]
    pub crowd_threshold: Option<i64>,
    #[serde(default, deserialize_with = "present_integer")]
    pub max_moves_per_stage: Option<i64>,
}

fn present_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    i64::deserialize(deserializer).map(Some)
}

fn validate_positive(field: &str, value: i64) -> Result<u32, FlowError> {
    if value < 1 {
        return Err(FlowError::InvalidConfig(format!(
            "{} must be at least 1, got {}",
            field, value
        )));
    }
    u32::try_from(value)
        .map_err(|_| FlowError::InvalidConfig(format!("{} is out of range: {}", field, value)))
}

// =============================================================================
// FLOW CONTROL
// =============================================================================

/// Flow mode plus auto-balance configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowControl {
    auto: bool,
    config: AutoBalanceConfig,
}

impl FlowControl {
    /// Manual mode with default tunables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(auto: bool, config: AutoBalanceConfig) -> Self {
        Self { auto, config }
    }

    /// Whether auto-balance is enabled.
    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.auto
    }

    pub fn set_auto(&mut self, auto: bool) {
        self.auto = auto;
    }

    #[must_use]
    pub fn config(&self) -> AutoBalanceConfig {
        self.config
    }

    /// Apply a partial update, validating every present field first.
    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<AutoBalanceConfig, FlowError> {
        let crowd_threshold = update
            .crowd_threshold
            .map(|v| validate_positive("crowd_threshold", v))
            .transpose()?;
        let max_moves_per_stage = update
            .max_moves_per_stage
            .map(|v| validate_positive("max_moves_per_stage", v))
            .transpose()?;

        if let Some(v) = crowd_threshold {
            self.config.crowd_threshold = v;
        }
        if let Some(v) = max_moves_per_stage {
            self.config.max_moves_per_stage = v;
        }
        Ok(self.config)
    }
}

// =============================================================================
// TESTS
// =============================================================================
