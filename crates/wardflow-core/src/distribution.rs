//! # Stage Distribution
//!
//! Per-stage occupancy counts, kept in parallel with the patient list.
//!
//! The counts are *not* derived from the registry. Seed data, simulation
//! ticks and resets set them independently, and every transition updates
//! them alongside the patient record. They can therefore disagree with the
//! number of patients actually sitting at a stage; the engine relies on the
//! counts for crowding decisions and on the registry for candidate selection.
//!
//! ## Ordering
//!
//! Entries keep insertion order. That order is observable: it breaks ties in
//! the least-busy ranking, decides which crowded stage auto-balance drains
//! first, and is the key order of the serialized JSON object.

use crate::Stage;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Insertion-ordered mapping from stage to occupant count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    entries: Vec<(Stage, u32)>,
}

impl Distribution {
    /// Create an empty distribution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(stage, count)` pairs. Later duplicates overwrite earlier ones
    /// in place.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (Stage, u32)>) -> Self {
        let mut dist = Self::new();
        for (stage, count) in entries {
            dist.set(stage, count);
        }
        dist
    }

    /// Count for a stage (0 when the stage has no entry).
    #[must_use]
    pub fn get(&self, stage: Stage) -> u32 {
        self.position(stage)
            .map(|idx| self.entries[idx].1)
            .unwrap_or(0)
    }

    /// Whether the stage has an entry (even a zero one).
    #[must_use]
    pub fn contains(&self, stage: Stage) -> bool {
        self.position(stage).is_some()
    }

    /// Set a count, appending the stage if it has no entry yet.
    pub fn set(&mut self, stage: Stage, count: u32) {
        match self.position(stage) {
            Some(idx) => self.entries[idx].1 = count,
            None => self.entries.push((stage, count)),
        }
    }

    /// Add one occupant, appending the stage if needed.
    pub fn increment(&mut self, stage: Stage) {
        let count = self.get(stage);
        self.set(stage, count.saturating_add(1));
    }

    /// Remove one occupant, flooring at zero. Absent stages stay absent.
    pub fn decrement(&mut self, stage: Stage) {
        if let Some(idx) = self.position(stage) {
            self.entries[idx].1 = self.entries[idx].1.saturating_sub(1);
        }
    }

    /// Bookkeeping for a single move: one out of `from`, one into `to`.
    pub fn transfer(&mut self, from: Stage, to: Stage) {
        self.decrement(from);
        self.increment(to);
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| u64::from(*c)).sum()
    }

    /// Number of stages with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(stage, count)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Mutable access to every count, in insertion order.
    pub fn counts_mut(&mut self) -> impl Iterator<Item = &mut u32> + '_ {
        self.entries.iter_mut().map(|(_, c)| c)
    }

    /// The `n` stages with the lowest counts, ascending.
    ///
    /// The sort is stable, so equal counts keep insertion order.
    #[must_use]
    pub fn least_busy(&self, n: usize) -> Vec<Stage> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|(_, count)| *count);
        sorted.into_iter().take(n).map(|(stage, _)| stage).collect()
    }

    fn position(&self, stage: Stage) -> Option<usize> {
        self.entries.iter().position(|(s, _)| *s == stage)
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (stage, count) in &self.entries {
            map.serialize_entry(stage, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = Distribution;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of stage names to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut dist = Distribution::new();
                while let Some((stage, count)) = access.next_entry::<Stage, u32>()? {
                    dist.set(stage, count);
                }
                Ok(dist)
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}

// =============================================================================
// TESTS
// =============================================================================
