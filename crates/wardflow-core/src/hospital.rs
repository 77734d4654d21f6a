//! # Hospital State
//!
//! The single state container behind the dashboard.
//!
//! A `Hospital` owns the patient registry, the parallel stage distribution,
//! the headline metrics, the flow-mode controller and the random source.
//! Every dashboard operation is a method on it, so one lock around one
//! `Hospital` is enough to make each operation atomic.
//!
//! ## Random source
//!
//! Randomness is injected. [`Hospital::new`] seeds from the OS;
//! [`Hospital::seeded`] gives a reproducible ChaCha stream; tests may pass
//! any `RngCore` through [`Hospital::with_rng`].

use crate::alerts::generate_alerts;
use crate::control::{AutoBalanceConfig, ConfigUpdate, FlowControl};
use crate::primitives::DEFAULT_WAIT_THRESHOLD;
use crate::simulation::{self, DashboardMetrics, DistributionView, TickReport, WaitTimes};
use crate::transition::TransitionEngine;
use crate::{
    Alert, Distribution, FlowError, MoveRecord, NewPatient, Patient, PatientId, PatientRegistry,
    Resource, Stage, StaffMember, seed,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boxed random source shared by every randomized operation.
pub type SharedRng = Box<dyn RngCore + Send + Sync>;

// =============================================================================
// SNAPSHOT TYPES
// =============================================================================

/// Full dashboard snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_patients: u32,
    pub avg_wait_time: f64,
    pub active_staff: u32,
    pub occupancy: u32,
    pub patient_distribution: Distribution,
    pub wait_times: WaitTimes,
}

/// Result of a balance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceOutcome {
    /// Flow mode is manual; nothing was considered.
    Idle,
    /// Auto-balance ran and produced these moves (possibly none).
    Balanced(Vec<MoveRecord>),
}

// =============================================================================
// HOSPITAL
// =============================================================================

/// The dashboard's in-memory state.
pub struct Hospital {
    registry: PatientRegistry,
    distribution: Distribution,
    metrics: DashboardMetrics,
    control: FlowControl,
    wait_threshold: u32,
    baseline_alerts: Vec<Alert>,
    rng: SharedRng,
}

impl fmt::Debug for Hospital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hospital")
            .field("patients", &self.registry.len())
            .field("distribution", &self.distribution)
            .field("control", &self.control)
            .field("wait_threshold", &self.wait_threshold)
            .finish_non_exhaustive()
    }
}

impl Default for Hospital {
    fn default() -> Self {
        Self::new()
    }
}

impl Hospital {
    /// Start-up snapshot with an OS-seeded random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Start-up snapshot with a reproducible random stream.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Start-up snapshot with a caller-provided random source.
    #[must_use]
    pub fn with_rng(rng: impl RngCore + Send + Sync + 'static) -> Self {
        Self {
            registry: seed::initial_registry(),
            distribution: seed::initial_distribution(),
            metrics: seed::initial_metrics(),
            control: FlowControl::new(),
            wait_threshold: DEFAULT_WAIT_THRESHOLD,
            baseline_alerts: seed::baseline_alerts(),
            rng: Box::new(rng),
        }
    }

    /// Replace registry and distribution, keeping everything else.
    #[must_use]
    pub fn with_state(mut self, registry: PatientRegistry, distribution: Distribution) -> Self {
        self.registry = registry;
        self.distribution = distribution;
        self
    }

    /// Set initial flow mode and auto-balance tunables.
    #[must_use]
    pub fn with_control(mut self, control: FlowControl) -> Self {
        self.control = control;
        self
    }

    /// Waiting time at which automatic advance picks up non-High patients.
    #[must_use]
    pub fn with_wait_threshold(mut self, minutes: u32) -> Self {
        self.wait_threshold = minutes;
        self
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Headline metrics plus the raw distribution.
    #[must_use]
    pub fn overview(&self) -> Overview {
        Overview {
            total_patients: self.metrics.total_patients,
            avg_wait_time: self.metrics.avg_wait_time,
            active_staff: self.metrics.active_staff,
            occupancy: self.metrics.occupancy,
            patient_distribution: self.distribution.clone(),
            wait_times: self.metrics.wait_times,
        }
    }

    #[must_use]
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    #[must_use]
    pub fn registry(&self) -> &PatientRegistry {
        &self.registry
    }

    pub fn patient(&self, id: PatientId) -> Result<&Patient, FlowError> {
        self.registry.get(id)
    }

    /// Chart view of the distribution with read-time jitter.
    pub fn distribution_view(&mut self) -> DistributionView {
        simulation::distribution_view(&self.distribution, &mut self.rng)
    }

    /// Patient listing with read-time jitter on queued patients.
    pub fn patients_view(&mut self) -> Vec<Patient> {
        simulation::patients_view(&self.registry, &mut self.rng)
    }

    /// A fresh random wait-time analysis.
    pub fn wait_times_view(&mut self) -> WaitTimes {
        simulation::sample_wait_times(&mut self.rng)
    }

    /// Current alert feed.
    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        generate_alerts(&self.registry, &self.distribution, &self.baseline_alerts)
    }

    #[must_use]
    pub fn staff(&self) -> Vec<StaffMember> {
        seed::staff()
    }

    #[must_use]
    pub fn resources(&self) -> Vec<Resource> {
        seed::resources()
    }

    // -------------------------------------------------------------------------
    // Flow control
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.control.is_auto()
    }

    pub fn set_auto(&mut self, auto: bool) {
        self.control.set_auto(auto);
    }

    #[must_use]
    pub fn config(&self) -> AutoBalanceConfig {
        self.control.config()
    }

    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<AutoBalanceConfig, FlowError> {
        self.control.update_config(update)
    }

    #[must_use]
    pub fn wait_threshold(&self) -> u32 {
        self.wait_threshold
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Register a patient and count it at its stage.
    pub fn admit(&mut self, patient: NewPatient) -> PatientId {
        let stage = patient.stage;
        let id = self.registry.append(patient);
        self.distribution.increment(stage);
        id
    }

    /// Automatic advance at the configured wait threshold.
    pub fn advance(&mut self) -> Vec<MoveRecord> {
        let threshold = self.wait_threshold;
        self.advance_with_threshold(threshold)
    }

    /// Automatic advance at an explicit wait threshold.
    pub fn advance_with_threshold(&mut self, wait_threshold: u32) -> Vec<MoveRecord> {
        TransitionEngine::advance(
            &mut self.registry,
            &mut self.distribution,
            wait_threshold,
            &mut self.rng,
        )
    }

    /// Manual move of one patient.
    pub fn move_patient(
        &mut self,
        id: PatientId,
        target: Stage,
    ) -> Result<Option<MoveRecord>, FlowError> {
        TransitionEngine::move_patient(&mut self.registry, &mut self.distribution, id, target)
    }

    /// Run auto-balance if flow mode is automatic.
    pub fn check_balance(&mut self) -> BalanceOutcome {
        if !self.control.is_auto() {
            return BalanceOutcome::Idle;
        }
        BalanceOutcome::Balanced(self.balance())
    }

    /// Run auto-balance regardless of flow mode.
    pub fn balance(&mut self) -> Vec<MoveRecord> {
        TransitionEngine::balance(
            &mut self.registry,
            &mut self.distribution,
            self.control.config(),
            &mut self.rng,
        )
    }

    // -------------------------------------------------------------------------
    // Simulation
    // -------------------------------------------------------------------------

    /// One simulated tick of hospital activity.
    pub fn simulate_tick(&mut self) -> TickReport {
        simulation::simulate_tick(
            &mut self.metrics,
            &mut self.distribution,
            &mut self.registry,
            &mut self.rng,
        )
    }

    /// Restore the reset snapshot and the seeded roster.
    ///
    /// Flow mode, tunables and the random stream carry over.
    pub fn reset(&mut self) {
        self.metrics = seed::reset_metrics();
        self.distribution = seed::reset_distribution();
        self.registry = seed::initial_registry();
    }
}

// =============================================================================
// TESTS
// =============================================================================
