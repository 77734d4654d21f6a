//! # Dashboard Simulation
//!
//! Randomized perturbation of the dashboard's headline metrics.
//!
//! Two kinds of randomness live here:
//!
//! - **Read-time jitter** (`distribution_view`, `patients_view`,
//!   `sample_wait_times`): fresh noise on every read, never written back.
//! - **Simulation ticks** (`simulate_tick`): a mutation of metrics, counts and
//!   roster that stands in for the passage of time.

use crate::primitives::{DISTRIBUTION_JITTER, DISTRIBUTION_VIEW_FLOOR, PATIENT_WAIT_JITTER};
use crate::{Distribution, NewPatient, Patient, PatientId, PatientRegistry, Priority, Stage};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

// =============================================================================
// METRICS
// =============================================================================

/// Wait-time analysis block shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitTimes {
    pub total_patients: u32,
    pub avg_wait: f64,
    pub max_wait: u32,
    pub min_wait: u32,
}

/// Headline dashboard numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_patients: u32,
    /// Minutes, one decimal place.
    pub avg_wait_time: f64,
    pub active_staff: u32,
    /// Percent of capacity in use.
    pub occupancy: u32,
    pub wait_times: WaitTimes,
}

/// Chart-ready distribution: parallel label and value arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionView {
    pub labels: Vec<Stage>,
    pub data: Vec<u32>,
}

/// Summary of one simulation tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub arrivals: Vec<PatientId>,
}

// =============================================================================
// READ-TIME JITTER
// =============================================================================

/// Distribution with every count jittered by ±3 and floored at 5.
pub fn distribution_view<R: RngCore>(dist: &Distribution, rng: &mut R) -> DistributionView {
    let (labels, data): (Vec<Stage>, Vec<u32>) = dist
        .iter()
        .map(|(stage, count)| {
            let jittered = jitter(count, DISTRIBUTION_JITTER, rng);
            (stage, jittered.max(DISTRIBUTION_VIEW_FLOOR))
        })
        .unzip();
    DistributionView { labels, data }
}

/// Patient listing with the waiting time of queued patients jittered by ±5.
pub fn patients_view<R: RngCore>(registry: &PatientRegistry, rng: &mut R) -> Vec<Patient> {
    let mut patients = registry.list();
    for patient in patients.iter_mut().filter(|p| p.is_waiting()) {
        patient.waiting_time = jitter(patient.waiting_time, PATIENT_WAIT_JITTER, rng);
    }
    patients
}

/// A fresh, fully random wait-time analysis.
pub fn sample_wait_times<R: RngCore>(rng: &mut R) -> WaitTimes {
    WaitTimes {
        total_patients: rng.gen_range(120..=180),
        avg_wait: round_tenths(rng.gen_range(15.0..=35.0)),
        max_wait: rng.gen_range(35..=60),
        min_wait: rng.gen_range(2..=10),
    }
}

/// `value + uniform[-spread, spread]`, floored at zero.
fn jitter<R: RngCore>(value: u32, spread: i64, rng: &mut R) -> u32 {
    let shifted = i64::from(value) + rng.gen_range(-spread..=spread);
    u32::try_from(shifted.max(0)).unwrap_or(u32::MAX)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// =============================================================================
// SIMULATION TICK
// =============================================================================

/// Advance the simulated clock by one tick.
///
/// Perturbs the headline metrics, reshuffles the distribution while keeping
/// its total, registers 1 to 5 new arrivals at Reception or Screening, and
/// recomputes the wait-time block.
pub fn simulate_tick<R: RngCore>(
    metrics: &mut DashboardMetrics,
    dist: &mut Distribution,
    registry: &mut PatientRegistry,
    rng: &mut R,
) -> TickReport {
    metrics.avg_wait_time = round_tenths(rng.gen_range(15.0..=40.0));
    metrics.active_staff = offset_clamped(metrics.active_staff, rng.gen_range(-1..=2), 5, 20);
    metrics.occupancy = offset_clamped(metrics.occupancy, rng.gen_range(-5..=8), 40, 95);

    reshuffle_preserving_total(dist, rng);

    let new_arrivals = rng.gen_range(1..=5);
    let mut arrivals = Vec::with_capacity(new_arrivals);
    for _ in 0..new_arrivals {
        let stage = if rng.gen_bool(0.5) {
            Stage::Reception
        } else {
            Stage::Screening
        };
        let id = registry.next_id();
        let arrival = NewPatient::arrival(format!("Patient {}", id), stage, random_priority(rng))
            .with_age(rng.gen_range(1..=90))
            .with_waiting_time(rng.gen_range(0..=10));
        arrivals.push(registry.append(arrival));
        dist.increment(stage);
    }

    metrics.total_patients = u32::try_from(registry.len()).unwrap_or(u32::MAX);

    let avg = metrics.avg_wait_time;
    let wait_times = &mut metrics.wait_times;
    wait_times.total_patients = metrics.total_patients;
    wait_times.avg_wait = avg;
    wait_times.max_wait = rng.gen_range(((avg * 1.5) as u32)..=((avg * 2.5) as u32));
    wait_times.min_wait = rng.gen_range(1..=((avg * 0.3) as u32).max(1));

    TickReport { arrivals }
}

/// Jitter each count by `[-5, 8]` (floor 5), then scale back to the prior total
/// (floor 1 per stage).
fn reshuffle_preserving_total<R: RngCore>(dist: &mut Distribution, rng: &mut R) {
    let prior_total = dist.total();

    for count in dist.counts_mut() {
        let changed = i64::from(*count) + rng.gen_range(-5..=8);
        *count = u32::try_from(changed.max(5)).unwrap_or(u32::MAX);
    }

    let current_total = dist.total();
    if current_total == 0 {
        return;
    }
    for count in dist.counts_mut() {
        let scaled = u64::from(*count) * prior_total / current_total;
        *count = u32::try_from(scaled.max(1)).unwrap_or(u32::MAX);
    }
}

/// New-arrival priority: Low 60%, Medium 30%, High 10%.
fn random_priority<R: RngCore>(rng: &mut R) -> Priority {
    match rng.gen_range(0..100) {
        0..=59 => Priority::Low,
        60..=89 => Priority::Medium,
        _ => Priority::High,
    }
}

fn offset_clamped(value: u32, delta: i64, min: u32, max: u32) -> u32 {
    let shifted = (i64::from(value) + delta).clamp(i64::from(min), i64::from(max));
    u32::try_from(shifted).unwrap_or(min)
}

// =============================================================================
// TESTS
// =============================================================================
