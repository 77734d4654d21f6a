//! # Property-Based Tests
//!
//! Invariants of the transition engine and alert generator under arbitrary
//! rosters and distributions.

use proptest::collection::vec;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wardflow_core::{
    AutoBalanceConfig, Distribution, FlowError, NewPatient, PatientId, PatientRegistry, Priority,
    STAGE_ORDER, Stage, TransitionEngine, generate_alerts, seed,
};

// =============================================================================
// STRATEGIES
// =============================================================================

fn stage() -> impl Strategy<Value = Stage> {
    (0..STAGE_ORDER.len()).prop_map(|i| STAGE_ORDER[i])
}

fn priority() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::Low), Just(Priority::Medium), Just(Priority::High)]
}

fn patient() -> impl Strategy<Value = NewPatient> {
    (stage(), priority(), 0u32..120).prop_map(|(stage, priority, wait)| {
        NewPatient::arrival("P", stage, priority).with_waiting_time(wait)
    })
}

/// A registry plus a distribution that counts exactly its patients.
fn consistent_state() -> impl Strategy<Value = (PatientRegistry, Distribution)> {
    vec(patient(), 0..60).prop_map(|patients| {
        let mut registry = PatientRegistry::new();
        let mut dist = Distribution::from_entries(STAGE_ORDER.iter().map(|s| (*s, 0)));
        for p in patients {
            dist.increment(p.stage);
            registry.append(p);
        }
        (registry, dist)
    })
}

fn stage_counts(registry: &PatientRegistry) -> Vec<(Stage, u32)> {
    STAGE_ORDER
        .iter()
        .map(|s| (*s, registry.at_stage(*s).len() as u32))
        .collect()
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Advance conserves the distribution total and keeps it in step with the roster.
    #[test]
    fn advance_conserves_counts((mut registry, mut dist) in consistent_state(), seed in any::<u64>()) {
        let total = dist.total();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        TransitionEngine::advance(&mut registry, &mut dist, 30, &mut rng);

        prop_assert_eq!(dist.total(), total);
        prop_assert_eq!(dist.iter().collect::<Vec<_>>(), stage_counts(&registry));
    }

    /// Advance never moves a patient backwards, never leaves Discharge, and
    /// only moves eligible patients exactly one step.
    #[test]
    fn advance_moves_eligible_patients_one_step((mut registry, mut dist) in consistent_state(), seed in any::<u64>()) {
        let before = registry.list();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let moved = TransitionEngine::advance(&mut registry, &mut dist, 30, &mut rng);

        for record in &moved {
            prop_assert_eq!(record.from.next(), Some(record.to));
        }
        for old in &before {
            let eligible = old.priority == Priority::High || old.waiting_time >= 30;
            let was_moved = moved.iter().any(|m| m.id == old.id);
            prop_assert_eq!(was_moved, eligible && !old.stage.is_terminal());
            if was_moved {
                let new_wait = registry.get(old.id).map(|p| p.waiting_time).unwrap_or(u32::MAX);
                prop_assert!(new_wait <= old.waiting_time.saturating_sub(5));
                prop_assert!(new_wait >= old.waiting_time.saturating_sub(15));
            }
        }
    }

    /// Auto-balance never moves more than the cap out of one stage and
    /// conserves the distribution total.
    #[test]
    fn balance_respects_cap(
        (mut registry, mut dist) in consistent_state(),
        crowd_threshold in 1u32..20,
        max_moves in 1u32..5,
        seed in any::<u64>(),
    ) {
        let total = dist.total();
        let config = AutoBalanceConfig { crowd_threshold, max_moves_per_stage: max_moves };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let moved = TransitionEngine::balance(&mut registry, &mut dist, config, &mut rng);

        for stage in STAGE_ORDER {
            let out = moved.iter().filter(|m| m.from == stage).count() as u32;
            prop_assert!(out <= max_moves);
        }
        prop_assert!(moved.iter().all(|m| m.from != m.to));
        prop_assert_eq!(dist.total(), total);
    }

    /// A manual move conserves the total; an unknown id changes nothing.
    #[test]
    fn manual_move_conserves_total(
        (mut registry, mut dist) in consistent_state(),
        id in 1u64..70,
        target in stage(),
    ) {
        let total = dist.total();
        let roster = registry.clone();
        let counts = dist.clone();
        let known = (id as usize) <= registry.len();

        match TransitionEngine::move_patient(&mut registry, &mut dist, PatientId(id), target) {
            Ok(Some(record)) => {
                prop_assert!(known);
                prop_assert_eq!(record.id, PatientId(id));
                prop_assert_eq!(record.to, target);
                prop_assert_ne!(record.from, target);
            }
            Ok(None) => {
                prop_assert!(known);
                prop_assert_eq!(&registry, &roster);
                prop_assert_eq!(&dist, &counts);
            }
            Err(err) => {
                prop_assert!(!known);
                prop_assert_eq!(err, FlowError::NotFound(PatientId(id)));
                prop_assert_eq!(&registry, &roster);
                prop_assert_eq!(&dist, &counts);
            }
        }
        prop_assert_eq!(dist.total(), total);
    }

    /// The alert feed is capped but never drops below the baseline.
    #[test]
    fn alerts_are_capped((registry, dist) in consistent_state()) {
        let alerts = generate_alerts(&registry, &dist, &seed::baseline_alerts());
        prop_assert!(alerts.len() <= 10);
        prop_assert!(alerts.len() >= seed::baseline_alerts().len().min(10));
    }
}
