//! # Transition Engine
//!
//! The three movement policies that mutate patient stages:
//!
//! - **Automatic advance**: every eligible, non-terminal patient steps to the
//!   next stage of the journey.
//! - **Manual move**: an operator sends one patient to any stage.
//! - **Auto-balance**: patients are drained from crowded stages into the
//!   least-occupied ones.
//!
//! Every move updates the patient record and the [`Distribution`] in the same
//! call: one decrement at the source (floored at 0), one increment at the
//! destination. Callers wanting atomicity across threads hold one lock over
//! the registry and distribution for the whole call; the engine itself is
//! single-threaded and synchronous.
//!
//! Business-rule mismatches never raise. The only error is a manual move
//! naming an unknown patient.

use crate::control::AutoBalanceConfig;
use crate::primitives::{AUTO_MOVE_WAIT_REDUCTION, BALANCE_DESTINATIONS, MANUAL_MOVE_WAIT_REDUCTION};
use crate::{Distribution, FlowError, MoveRecord, Patient, PatientId, PatientRegistry, Priority, Stage};
use rand::{Rng, RngCore};

/// Stateless namespace for the movement policies.
pub struct TransitionEngine;

impl TransitionEngine {
    /// Whether a patient may advance automatically.
    ///
    /// High priority always qualifies; otherwise the patient must have
    /// waited at least `wait_threshold` minutes.
    #[must_use]
    pub fn is_eligible(patient: &Patient, wait_threshold: u32) -> bool {
        patient.priority == Priority::High || patient.waiting_time >= wait_threshold
    }

    /// Advance every eligible patient one stage.
    ///
    /// Patients at the terminal stage are skipped. Moves are returned in
    /// registry order.
    pub fn advance<R: RngCore>(
        registry: &mut PatientRegistry,
        dist: &mut Distribution,
        wait_threshold: u32,
        rng: &mut R,
    ) -> Vec<MoveRecord> {
        let mut moved = Vec::new();

        for patient in registry.patients_mut() {
            if !Self::is_eligible(patient, wait_threshold) {
                continue;
            }
            let Some(next) = patient.stage.next() else {
                continue;
            };
            let reduction = random_reduction(rng);
            moved.push(relocate(patient, dist, next, reduction));
        }

        moved
    }

    /// Move one patient to `target`.
    ///
    /// Returns `Ok(None)` without touching anything when the patient is
    /// already at `target`.
    pub fn move_patient(
        registry: &mut PatientRegistry,
        dist: &mut Distribution,
        id: PatientId,
        target: Stage,
    ) -> Result<Option<MoveRecord>, FlowError> {
        let patient = registry.get_mut(id)?;
        if patient.stage == target {
            return Ok(None);
        }
        Ok(Some(relocate(
            patient,
            dist,
            target,
            MANUAL_MOVE_WAIT_REDUCTION,
        )))
    }

    /// Drain crowded stages into the least-occupied ones.
    ///
    /// The destination ranking and the per-stage counts are taken once, before
    /// any move, so moves made during the pass do not change which stages are
    /// considered crowded or where patients are sent. Candidates are chosen
    /// from the registry at the time their stage is processed, longest wait
    /// first.
    pub fn balance<R: RngCore>(
        registry: &mut PatientRegistry,
        dist: &mut Distribution,
        config: AutoBalanceConfig,
        rng: &mut R,
    ) -> Vec<MoveRecord> {
        if dist.is_empty() {
            return Vec::new();
        }

        let least_busy = dist.least_busy(BALANCE_DESTINATIONS);
        let counts: Vec<(Stage, u32)> = dist.iter().collect();
        let mut moved = Vec::new();

        for (stage, count) in counts {
            if count < config.crowd_threshold {
                continue;
            }
            let excess = count - config.crowd_threshold + 1;
            let to_move = excess.min(config.max_moves_per_stage) as usize;

            let Some(target) = least_busy
                .iter()
                .copied()
                .find(|candidate| *candidate != stage)
                .or_else(|| stage.next())
            else {
                continue;
            };

            let mut candidates: Vec<(PatientId, u32)> = registry
                .iter()
                .filter(|p| p.stage == stage)
                .map(|p| (p.id, p.waiting_time))
                .collect();
            candidates.sort_by(|a, b| b.1.cmp(&a.1));

            for (id, _) in candidates.into_iter().take(to_move) {
                let Ok(patient) = registry.get_mut(id) else {
                    continue;
                };
                let reduction = random_reduction(rng);
                moved.push(relocate(patient, dist, target, reduction));
            }
        }

        moved
    }
}

fn random_reduction<R: RngCore>(rng: &mut R) -> u32 {
    let (low, high) = AUTO_MOVE_WAIT_REDUCTION;
    rng.gen_range(low..=high)
}

/// Apply one move: stage change, waiting-time reduction, distribution transfer.
fn relocate(
    patient: &mut Patient,
    dist: &mut Distribution,
    to: Stage,
    wait_reduction: u32,
) -> MoveRecord {
    let from = patient.stage;
    patient.stage = to;
    patient.reduce_wait(wait_reduction);
    dist.transfer(from, to);

    MoveRecord {
        id: patient.id,
        from,
        to,
        priority: patient.priority,
    }
}

// =============================================================================
// TESTS
// =============================================================================
