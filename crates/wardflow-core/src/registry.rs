//! # Patient Registry
//!
//! The ordered in-memory patient collection.
//!
//! Insertion order is the registry's natural order: automatic advance walks
//! patients in it and it breaks ties when auto-balance ranks candidates.
//! Records are updated in place and never reordered.

use crate::{FlowError, NewPatient, Patient, PatientId, Stage};

/// Ordered collection of patient records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientRegistry {
    patients: Vec<Patient>,
}

impl PatientRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-registered records, keeping their ids.
    #[must_use]
    pub fn from_patients(patients: Vec<Patient>) -> Self {
        Self { patients }
    }

    /// Snapshot copy of every patient in registry order.
    #[must_use]
    pub fn list(&self) -> Vec<Patient> {
        self.patients.clone()
    }

    /// Borrowing iterator in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Patient> + '_ {
        self.patients.iter()
    }

    /// Look up a patient by id.
    pub fn get(&self, id: PatientId) -> Result<&Patient, FlowError> {
        self.patients
            .iter()
            .find(|p| p.id == id)
            .ok_or(FlowError::NotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: PatientId) -> Result<&mut Patient, FlowError> {
        self.patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(FlowError::NotFound(id))
    }

    pub(crate) fn patients_mut(&mut self) -> &mut [Patient] {
        &mut self.patients
    }

    /// Id the next appended patient will receive: `max(existing) + 1`, or 1.
    #[must_use]
    pub fn next_id(&self) -> PatientId {
        let max = self.patients.iter().map(|p| p.id.0).max().unwrap_or(0);
        PatientId(max.saturating_add(1))
    }

    /// Register a patient at the end of the collection and return its id.
    pub fn append(&mut self, patient: NewPatient) -> PatientId {
        let id = self.next_id();
        self.patients.push(patient.register(id));
        id
    }

    /// Ids of the patients currently at `stage`, in registry order.
    #[must_use]
    pub fn at_stage(&self, stage: Stage) -> Vec<PatientId> {
        self.patients
            .iter()
            .filter(|p| p.stage == stage)
            .map(|p| p.id)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Priority;

    #[test]
    fn append_assigns_sequential_ids() {
        let mut registry = PatientRegistry::new();
        assert_eq!(registry.next_id(), PatientId(1));

        let a = registry.append(NewPatient::arrival("A", Stage::Reception, Priority::Low));
        let b = registry.append(NewPatient::arrival("B", Stage::Screening, Priority::High));
        assert_eq!(a, PatientId(1));
        assert_eq!(b, PatientId(2));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn next_id_follows_max_not_len() {
        let registry = PatientRegistry::from_patients(vec![
            NewPatient::arrival("A", Stage::Reception, Priority::Low).register(PatientId(10)),
            NewPatient::arrival("B", Stage::Reception, Priority::Low).register(PatientId(4)),
        ]);
        assert_eq!(registry.next_id(), PatientId(11));
    }

    #[test]
    fn get_missing_is_not_found() {
        let registry = PatientRegistry::new();
        assert_eq!(
            registry.get(PatientId(5)).err(),
            Some(FlowError::NotFound(PatientId(5)))
        );
    }

    #[test]
    fn list_is_a_snapshot() {
        let mut registry = PatientRegistry::new();
        registry.append(NewPatient::arrival("A", Stage::Reception, Priority::Low));
        let snapshot = registry.list();
        registry.append(NewPatient::arrival("B", Stage::Reception, Priority::Low));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.at_stage(Stage::Reception).len(), 2);
    }
}
