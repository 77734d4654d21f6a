//! # Flow Scenario Tests (F0-F3)
//!
//! End-to-end scenarios against a whole `Hospital`.
//!
//! ## Tiers
//! - F0: Stage topology
//! - F1: Automatic advance
//! - F2: Manual moves
//! - F3: Auto-balance and alerts

#![allow(clippy::panic)]

use wardflow_core::{
    AlertId, BalanceOutcome, ConfigUpdate, Distribution, FlowError, Hospital, NewPatient,
    PatientId, PatientRegistry, Priority, STAGE_ORDER, Stage, next_of,
};

fn hospital_with(patients: Vec<NewPatient>, dist: Distribution) -> Hospital {
    let mut registry = PatientRegistry::new();
    for patient in patients {
        registry.append(patient);
    }
    Hospital::seeded(42).with_state(registry, dist)
}

// =============================================================================
// TIER F0: STAGE TOPOLOGY
// =============================================================================

mod f0_topology {
    use super::*;

    /// F0.1: Only the last stage has no successor.
    #[test]
    fn only_discharge_is_terminal() {
        let terminal: Vec<Stage> = STAGE_ORDER
            .iter()
            .copied()
            .filter(|s| next_of(*s).is_none())
            .collect();
        assert_eq!(terminal, vec![Stage::Discharge]);
    }

    /// F0.2: Walking `next_of` from Reception visits every stage once.
    #[test]
    fn journey_visits_every_stage() {
        let mut walk = vec![Stage::Reception];
        while let Some(next) = walk.last().and_then(|s| next_of(*s)) {
            walk.push(next);
        }
        assert_eq!(walk, STAGE_ORDER.to_vec());
    }
}

// =============================================================================
// TIER F1: AUTOMATIC ADVANCE
// =============================================================================

mod f1_advance {
    use super::*;

    /// F1.1: A single High-priority patient at Reception moves to Screening.
    #[test]
    fn high_priority_reception_patient_moves_to_screening() {
        let mut hospital = hospital_with(
            vec![NewPatient::arrival("A", Stage::Reception, Priority::High)],
            Distribution::from_entries([(Stage::Reception, 1), (Stage::Screening, 0)]),
        );

        let moved = hospital.advance();

        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, PatientId(1));
        assert_eq!(moved[0].from, Stage::Reception);
        assert_eq!(moved[0].to, Stage::Screening);
        assert_eq!(hospital.distribution().get(Stage::Reception), 0);
        assert_eq!(hospital.distribution().get(Stage::Screening), 1);
    }

    /// F1.2: Moves come back in registry order.
    #[test]
    fn moves_follow_registry_order() {
        let mut hospital = hospital_with(
            vec![
                NewPatient::arrival("A", Stage::Imaging, Priority::Low).with_waiting_time(31),
                NewPatient::arrival("B", Stage::Reception, Priority::Low).with_waiting_time(5),
                NewPatient::arrival("C", Stage::Surgery, Priority::High),
                NewPatient::arrival("D", Stage::Discharge, Priority::High),
            ],
            Distribution::new(),
        );

        let moved = hospital.advance();

        let ids: Vec<PatientId> = moved.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![PatientId(1), PatientId(3)]);
        assert_eq!(moved[1].to, Stage::Treatment);
    }

    /// F1.3: A custom threshold changes eligibility.
    #[test]
    fn threshold_is_respected() {
        let mut hospital = hospital_with(
            vec![NewPatient::arrival("A", Stage::Imaging, Priority::Medium).with_waiting_time(12)],
            Distribution::new(),
        );

        assert!(hospital.advance_with_threshold(13).is_empty());
        assert_eq!(hospital.advance_with_threshold(12).len(), 1);
    }
}

// =============================================================================
// TIER F2: MANUAL MOVES
// =============================================================================

mod f2_manual {
    use super::*;

    /// F2.1: Unknown patients are reported and nothing changes.
    #[test]
    fn unknown_patient_leaves_state_unchanged() {
        let mut hospital = Hospital::seeded(1);
        let before = hospital.overview();
        let roster = hospital.registry().clone();

        let result = hospital.move_patient(PatientId(999), Stage::Imaging);

        assert_eq!(result, Err(FlowError::NotFound(PatientId(999))));
        assert_eq!(hospital.overview(), before);
        assert_eq!(hospital.registry(), &roster);
    }

    /// F2.2: A same-stage move is a no-op.
    #[test]
    fn same_stage_move_is_a_no_op() {
        let mut hospital = Hospital::seeded(1);
        let before = hospital.overview();

        let result = hospital.move_patient(PatientId(1), Stage::Reception);

        assert_eq!(result, Ok(None));
        assert_eq!(hospital.overview(), before);
        assert_eq!(hospital.patient(PatientId(1)).map(|p| p.waiting_time), Ok(25));
    }

    /// F2.3: A real move reduces waiting time by exactly five.
    #[test]
    fn move_reduces_wait_by_five() {
        let mut hospital = Hospital::seeded(1);

        let record = hospital
            .move_patient(PatientId(4), Stage::Consultation)
            .expect("known patient");

        assert!(record.is_some());
        assert_eq!(hospital.patient(PatientId(4)).map(|p| p.waiting_time), Ok(30));
        assert_eq!(hospital.distribution().get(Stage::Imaging), 0);
        assert_eq!(hospital.distribution().get(Stage::Consultation), 2);
    }
}

// =============================================================================
// TIER F3: AUTO-BALANCE AND ALERTS
// =============================================================================

mod f3_balance_and_alerts {
    use super::*;

    /// F3.1: Automatic mode drains a crowded stage, capped per stage.
    #[test]
    fn auto_mode_balances_with_cap() {
        let patients = (0..10)
            .map(|i| {
                NewPatient::arrival(format!("P{}", i), Stage::Reception, Priority::Low)
                    .with_waiting_time(i)
            })
            .collect();
        let mut hospital = hospital_with(
            patients,
            Distribution::from_entries([(Stage::Reception, 45), (Stage::Imaging, 2)]),
        );
        hospital.set_auto(true);

        let BalanceOutcome::Balanced(moved) = hospital.check_balance() else {
            panic!("auto mode should balance");
        };

        assert_eq!(moved.len(), 3);
        assert!(moved.iter().all(|m| m.from == Stage::Reception));
        assert!(moved.iter().all(|m| m.to == Stage::Imaging));
        // Longest waits first: P9, P8, P7.
        let ids: Vec<PatientId> = moved.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![PatientId(10), PatientId(9), PatientId(8)]);
        assert_eq!(hospital.distribution().total(), 47);
    }

    /// F3.2: Raising the cap raises the number of moves, bounded by the excess.
    #[test]
    fn config_changes_take_effect() {
        let patients = (0..10)
            .map(|i| NewPatient::arrival(format!("P{}", i), Stage::Reception, Priority::Low))
            .collect();
        let mut hospital = hospital_with(
            patients,
            Distribution::from_entries([(Stage::Reception, 12), (Stage::Imaging, 0)]),
        );
        hospital.set_auto(true);
        hospital
            .update_config(ConfigUpdate {
                crowd_threshold: Some(8),
                max_moves_per_stage: Some(10),
            })
            .expect("valid config");

        let moved = hospital.balance();

        // 12 - 8 + 1
        assert_eq!(moved.len(), 5);
    }

    /// F3.3: Alerts reflect state changes immediately.
    #[test]
    fn alerts_follow_state() {
        let mut hospital = hospital_with(
            vec![NewPatient::arrival("Long", Stage::Imaging, Priority::Low).with_waiting_time(50)],
            Distribution::from_entries([(Stage::Imaging, 1)]),
        );

        let alerts = hospital.alerts();
        assert_eq!(alerts[0].id, AlertId::Key("wait-1".to_string()));
        assert!(alerts.len() <= 10);

        // Moving manually cuts the wait to 45, still alerting.
        hospital
            .move_patient(PatientId(1), Stage::Consultation)
            .expect("known patient");
        assert!(hospital.alerts()[0].message.contains("(45 min)"));

        hospital
            .move_patient(PatientId(1), Stage::Surgery)
            .expect("known patient");
        assert!(
            hospital
                .alerts()
                .iter()
                .all(|a| a.id != AlertId::Key("wait-1".to_string()))
        );
    }
}
