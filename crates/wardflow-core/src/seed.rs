//! # Seed Data
//!
//! The fixed snapshots the demo starts from and resets to, plus the static
//! staff, resource and baseline-alert lists.
//!
//! The start-up snapshot and the reset snapshot intentionally differ: a reset
//! brings back the reset metrics and distribution together with the start-up
//! patient roster.

use crate::simulation::{DashboardMetrics, WaitTimes};
use crate::{
    Alert, AlertId, AlertKind, Distribution, NewPatient, PatientId, PatientRegistry, Priority,
    Resource, Stage, StaffMember,
};

// =============================================================================
// START-UP SNAPSHOT
// =============================================================================

/// Headline metrics at process start.
#[must_use]
pub fn initial_metrics() -> DashboardMetrics {
    DashboardMetrics {
        total_patients: 143,
        avg_wait_time: 23.3,
        active_staff: 14,
        occupancy: 82,
        wait_times: WaitTimes {
            total_patients: 170,
            avg_wait: 21.0,
            max_wait: 47,
            min_wait: 5,
        },
    }
}

/// Stage counts at process start.
#[must_use]
pub fn initial_distribution() -> Distribution {
    Distribution::from_entries([
        (Stage::Reception, 1),
        (Stage::Consultation, 1),
        (Stage::Discharge, 1),
        (Stage::Imaging, 1),
        (Stage::Treatment, 1),
    ])
}

/// The five seeded patients.
#[must_use]
pub fn initial_registry() -> PatientRegistry {
    let roster = [
        (1, "John Doe", 45, "Cataract", "Waiting", Stage::Reception, Priority::Medium, 2, "10:15", 25),
        (2, "Jane Smith", 32, "Glaucoma", "In Treatment", Stage::Consultation, Priority::High, 2, "09:50", 15),
        (3, "Bob Johnson", 58, "Retinal Detachment", "Completed", Stage::Discharge, Priority::Low, 4, "08:30", 0),
        (4, "Alice Brown", 29, "Dry Eyes", "Waiting", Stage::Imaging, Priority::Medium, 1, "10:40", 35),
        (5, "Charlie Wilson", 67, "Macular Degeneration", "In Treatment", Stage::Treatment, Priority::High, 4, "11:00", 10),
    ];

    let patients = roster
        .into_iter()
        .map(
            |(id, name, age, condition, status, stage, priority, doctor, entry, wait)| {
                NewPatient::arrival(name, stage, priority)
                    .with_age(age)
                    .with_condition(condition)
                    .with_status(status)
                    .with_doctor(doctor)
                    .with_entry_time(entry)
                    .with_waiting_time(wait)
                    .register(PatientId(id))
            },
        )
        .collect();

    PatientRegistry::from_patients(patients)
}

// =============================================================================
// RESET SNAPSHOT
// =============================================================================

/// Headline metrics restored by a reset.
#[must_use]
pub fn reset_metrics() -> DashboardMetrics {
    DashboardMetrics {
        total_patients: 145,
        avg_wait_time: 23.5,
        active_staff: 12,
        occupancy: 78,
        wait_times: WaitTimes {
            total_patients: 145,
            avg_wait: 23.5,
            max_wait: 45,
            min_wait: 5,
        },
    }
}

/// Stage counts restored by a reset.
#[must_use]
pub fn reset_distribution() -> Distribution {
    Distribution::from_entries([
        (Stage::Screening, 25),
        (Stage::Imaging, 18),
        (Stage::Reception, 32),
        (Stage::Pharmacy, 15),
    ])
}

// =============================================================================
// STATIC REFERENCE DATA
// =============================================================================

/// Staff roster (also served as the doctor list).
#[must_use]
pub fn staff() -> Vec<StaffMember> {
    [
        (1, "Dr. Sarah Johnson", "Ophthalmologist", "Available", 8),
        (2, "Dr. Michael Chen", "Optometrist", "Busy", 12),
        (3, "Nurse Emily Davis", "RN", "Available", 6),
        (4, "Dr. Robert Taylor", "Surgeon", "In Surgery", 3),
        (5, "Nurse Lisa Wong", "LPN", "Available", 9),
    ]
    .into_iter()
    .map(|(id, name, role, status, patients_today)| StaffMember {
        id,
        name: name.to_string(),
        role: role.to_string(),
        status: status.to_string(),
        patients_today,
    })
    .collect()
}

/// Rooms and equipment.
#[must_use]
pub fn resources() -> Vec<Resource> {
    [
        (1, "Room 1", "Available"),
        (2, "Room 2", "Busy"),
        (3, "Imaging Scanner", "Available"),
        (4, "Surgical Machine", "Busy"),
    ]
    .into_iter()
    .map(|(id, name, status)| Resource {
        id,
        name: name.to_string(),
        status: status.to_string(),
    })
    .collect()
}

/// The fixed alert feed that synthesized alerts are merged into.
#[must_use]
pub fn baseline_alerts() -> Vec<Alert> {
    [
        (1, AlertKind::Warning, "High patient wait time in Reception", "2 minutes ago"),
        (2, AlertKind::Info, "Dr. Chen completed 12 patient consultations today", "15 minutes ago"),
        (3, AlertKind::Success, "Pharmacy inventory restocked", "1 hour ago"),
        (4, AlertKind::Danger, "Room 3 equipment maintenance required", "2 hours ago"),
    ]
    .into_iter()
    .map(|(id, kind, message, time)| Alert {
        id: AlertId::Seq(id),
        kind,
        message: message.to_string(),
        time: time.to_string(),
    })
    .collect()
}
