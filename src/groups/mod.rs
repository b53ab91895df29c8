//! Group hierarchy

mod group;
mod hierarchy;

pub use group::{CombinatorKind, Group, GroupId};
pub use hierarchy::{GroupHierarchy, Level};
