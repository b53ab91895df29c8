//! The nine limit-state buckets

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ponderation::{Ponderation, PonderationKey};

/// Limit state a ponderation is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LimitState {
    /// Static equilibrium
    EluEqu,
    /// Structural resistance
    EluStr,
    /// Ground resistance
    EluGeo,
    /// Fatigue
    EluFat,
    /// Accidental design situation
    EluAcc,
    /// Seismic design situation
    EluSis,
    /// Characteristic serviceability combination
    ElsCar,
    /// Frequent serviceability combination
    ElsFreq,
    /// Quasi-permanent serviceability combination
    ElsPerm,
}

impl LimitState {
    pub const ALL: [LimitState; 9] = [
        Self::EluEqu,
        Self::EluStr,
        Self::EluGeo,
        Self::EluFat,
        Self::EluAcc,
        Self::EluSis,
        Self::ElsCar,
        Self::ElsFreq,
        Self::ElsPerm,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::EluEqu => "ELU_EQU",
            Self::EluStr => "ELU_STR",
            Self::EluGeo => "ELU_GEO",
            Self::EluFat => "ELU_FAT",
            Self::EluAcc => "ELU_ACC",
            Self::EluSis => "ELU_SIS",
            Self::ElsCar => "ELS_CAR",
            Self::ElsFreq => "ELS_FREQ",
            Self::ElsPerm => "ELS_PERM",
        }
    }
}

impl fmt::Display for LimitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generated ponderations, one list per limit state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ponderations {
    buckets: [Vec<Ponderation>; 9],
}

impl Ponderations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ponderations of a limit state
    pub fn bucket(&self, state: LimitState) -> &[Ponderation] {
        &self.buckets[state.index()]
    }

    /// Iterate over `(state, ponderations)` in limit-state order
    pub fn iter(&self) -> impl Iterator<Item = (LimitState, &[Ponderation])> {
        LimitState::ALL
            .into_iter()
            .map(move |state| (state, self.bucket(state)))
    }

    /// Total number of ponderations
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }
}

/// Bucket builder rejecting duplicate ponderations
#[derive(Debug, Default)]
pub struct BucketSet {
    ponderations: Ponderations,
    seen: [HashSet<PonderationKey>; 9],
}

impl BucketSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ponderation unless it is empty or already present in the bucket.
    /// Returns whether it was inserted.
    pub fn insert(&mut self, state: LimitState, ponderation: Ponderation) -> bool {
        if ponderation.is_empty() {
            return false;
        }
        let index = state.index();
        if !self.seen[index].insert(ponderation.key()) {
            return false;
        }
        self.ponderations.buckets[index].push(ponderation);
        true
    }

    /// Append another set, keeping its order and skipping duplicates
    pub fn merge(&mut self, other: BucketSet) {
        let Ponderations { buckets } = other.ponderations;
        for (state, bucket) in LimitState::ALL.into_iter().zip(buckets) {
            for ponderation in bucket {
                self.insert(state, ponderation);
            }
        }
    }

    pub fn bucket(&self, state: LimitState) -> &[Ponderation] {
        self.ponderations.bucket(state)
    }

    pub fn into_ponderations(self) -> Ponderations {
        self.ponderations
    }
}
