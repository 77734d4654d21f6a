//! # Engine Primitives
//!
//! Fixed rule constants for the flow engine. Tunables that operators may
//! change at runtime live in [`crate::control`]; everything here is compiled in.

// =============================================================================
// TRANSITION RULES
// =============================================================================

/// Default waiting time (minutes) at which a non-High patient becomes
/// eligible for automatic advance.
pub const DEFAULT_WAIT_THRESHOLD: u32 = 30;

/// Bounds (inclusive) of the random waiting-time reduction applied by
/// automatic advance and auto-balance moves.
pub const AUTO_MOVE_WAIT_REDUCTION: (u32, u32) = (5, 15);

/// Fixed waiting-time reduction applied by a manual move.
pub const MANUAL_MOVE_WAIT_REDUCTION: u32 = 5;

/// How many least-occupied stages auto-balance considers as destinations.
pub const BALANCE_DESTINATIONS: usize = 3;

/// Default occupancy at which auto-balance treats a stage as crowded.
pub const DEFAULT_CROWD_THRESHOLD: u32 = 40;

/// Default cap on patients moved out of one crowded stage per balance pass.
pub const DEFAULT_MAX_MOVES_PER_STAGE: u32 = 3;

// =============================================================================
// ALERT RULES
// =============================================================================

/// Waiting time (minutes) at which a patient triggers a warning alert.
pub const ALERT_WAIT_MINUTES: u32 = 45;

/// Stage occupancy at which a danger alert is raised.
pub const ALERT_STAGE_LOAD: u32 = 40;

/// Maximum number of alerts returned by one query.
pub const MAX_ALERTS: usize = 10;

// =============================================================================
// READ-TIME JITTER
// =============================================================================

/// Per-stage jitter applied to the distribution chart.
pub const DISTRIBUTION_JITTER: i64 = 3;

/// Floor for jittered distribution chart values.
pub const DISTRIBUTION_VIEW_FLOOR: u32 = 5;

/// Jitter applied to the waiting time of queued patients in listings.
pub const PATIENT_WAIT_JITTER: i64 = 5;
