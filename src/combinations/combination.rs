//! Combinations: sets of actions acting simultaneously

use std::collections::HashSet;

use serde::Serialize;

use crate::actions::ActionId;

/// One action of a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CombinationElement {
    pub action: ActionId,
    /// Whether the action is the predominant variable action of the pass
    pub predominant: bool,
}

/// Actions acting together, in insertion order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Combination {
    pub elements: Vec<CombinationElement>,
}

impl Combination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combination made of a single action
    pub fn single(action: ActionId, predominant: bool) -> Self {
        Self {
            elements: vec![CombinationElement { action, predominant }],
        }
    }

    /// Append the elements of another combination
    pub fn fuse(&mut self, other: &Combination) {
        self.elements.extend_from_slice(&other.elements);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.elements.iter().map(|element| element.action)
    }

    pub fn has_predominant(&self) -> bool {
        self.elements.iter().any(|element| element.predominant)
    }

    /// Order-insensitive multiset equality of `(action, predominant)` pairs
    pub fn same_as(&self, other: &Combination) -> bool {
        self.len() == other.len() && self.sorted() == other.sorted()
    }

    /// Order-insensitive identity used for deduplication
    pub(crate) fn key(&self) -> Vec<CombinationElement> {
        self.sorted()
    }

    fn sorted(&self) -> Vec<CombinationElement> {
        let mut elements = self.elements.clone();
        elements.sort_unstable();
        elements
    }
}

/// Combinations of one group, rejecting duplicates in the sense of
/// [`Combination::same_as`] while keeping insertion order
#[derive(Debug, Default)]
pub struct CombinationSet {
    combinations: Vec<Combination>,
    seen: HashSet<Vec<CombinationElement>>,
}

impl CombinationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `combination` unless an equal one is already present.
    /// Returns whether it was inserted.
    pub fn insert(&mut self, combination: Combination) -> bool {
        if !self.seen.insert(combination.key()) {
            return false;
        }
        self.combinations.push(combination);
        true
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    pub fn into_vec(self) -> Vec<Combination> {
        self.combinations
    }
}
