//! Groups of actions (or of lower-level groups)

use serde::{Deserialize, Serialize};

/// Stable identifier of a group; never reused or renumbered
pub type GroupId = usize;

/// Rule merging the combinations of a group's elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombinatorKind {
    /// All elements act together
    And,
    /// Any non-empty subset of the elements may act
    Or,
    /// Exactly one element acts
    Xor,
}

impl Default for CombinatorKind {
    fn default() -> Self {
        Self::And
    }
}

/// A group belonging to one level of the hierarchy.
///
/// Elements are action ids for groups of level 0 and group ids of the level
/// below otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Stable id
    pub id: GroupId,
    /// Display name
    pub name: String,
    /// Combinator
    pub kind: CombinatorKind,
    /// Referenced elements, in insertion order
    pub elements: Vec<usize>,
}

impl Group {
    pub fn new(id: GroupId, kind: CombinatorKind, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            elements: Vec::new(),
        }
    }

    /// Check if this group references the given element
    pub fn includes(&self, child: usize) -> bool {
        self.elements.contains(&child)
    }
}
