//! # Alert Generator
//!
//! Derives the dashboard's alert feed from current state.
//!
//! Synthesized alerts come first (long waits, then overloaded stages), followed
//! by the fixed baseline feed. A synthesized alert whose message already
//! appears in the baseline is dropped. The feed is capped at [`MAX_ALERTS`].

use crate::primitives::{ALERT_STAGE_LOAD, ALERT_WAIT_MINUTES, MAX_ALERTS};
use crate::{Alert, AlertId, AlertKind, Distribution, PatientRegistry};
use std::collections::HashSet;

const JUST_NOW: &str = "just now";

/// Build the alert feed. Pure: no state is modified.
#[must_use]
pub fn generate_alerts(
    registry: &PatientRegistry,
    dist: &Distribution,
    baseline: &[Alert],
) -> Vec<Alert> {
    let baseline_messages: HashSet<&str> = baseline.iter().map(|a| a.message.as_str()).collect();

    let waits = registry
        .iter()
        .filter(|p| p.waiting_time >= ALERT_WAIT_MINUTES)
        .map(|p| Alert {
            id: AlertId::Key(format!("wait-{}", p.id)),
            kind: AlertKind::Warning,
            message: format!(
                "Patient {} wait time very high ({} min)",
                p.name, p.waiting_time
            ),
            time: JUST_NOW.to_string(),
        });

    let loads = dist
        .iter()
        .filter(|(_, count)| *count >= ALERT_STAGE_LOAD)
        .map(|(stage, count)| Alert {
            id: AlertId::Key(format!("load-{}", stage)),
            kind: AlertKind::Danger,
            message: format!("High load in {}: {} patients", stage, count),
            time: JUST_NOW.to_string(),
        });

    waits
        .chain(loads)
        .filter(|alert| !baseline_messages.contains(alert.message.as_str()))
        .chain(baseline.iter().cloned())
        .take(MAX_ALERTS)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
