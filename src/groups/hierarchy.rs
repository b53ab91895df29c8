//! Levels of groups forming the combination tree

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::group::{CombinatorKind, Group, GroupId};
use crate::actions::{ActionId, ActionRegistry};
use crate::error::{CombiError, CombiResult};

/// One level of the hierarchy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub groups: Vec<Group>,
}

impl Level {
    /// Find a group of this level
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == id)
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.group(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Ordered levels of groups. Level 0 references actions, level k references
/// groups of level k-1 and the last level holds the root group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "HierarchyData")]
pub struct GroupHierarchy {
    levels: Vec<Level>,
    next_group_id: GroupId,
}

/// Serialized form, checked before it becomes a hierarchy
#[derive(Deserialize)]
struct HierarchyData {
    #[serde(default)]
    levels: Vec<Level>,
    #[serde(default)]
    next_group_id: GroupId,
}

impl TryFrom<HierarchyData> for GroupHierarchy {
    type Error = CombiError;

    fn try_from(data: HierarchyData) -> CombiResult<Self> {
        let mut levels = data.levels;
        if levels.is_empty() {
            levels.push(Level::default());
        }

        let mut ids = HashSet::new();
        for group in levels.iter().flat_map(|level| &level.groups) {
            if !ids.insert(group.id) {
                return Err(CombiError::Structural(format!("group id {} is used twice", group.id)));
            }
        }

        // Ids handed out later must not collide with stored ones
        let next_group_id = ids
            .iter()
            .max()
            .map(|&id| id + 1)
            .unwrap_or(0)
            .max(data.next_group_id);

        Ok(Self { levels, next_group_id })
    }
}

impl Default for GroupHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupHierarchy {
    /// Create a hierarchy holding a single empty level
    pub fn new() -> Self {
        Self {
            levels: vec![Level::default()],
            next_group_id: 0,
        }
    }

    // ========================
    // Editing
    // ========================

    /// Append an empty level, returning its index
    pub fn add_level(&mut self) -> usize {
        self.levels.push(Level::default());
        self.levels.len() - 1
    }

    /// Remove a level together with every level above it.
    ///
    /// The hierarchy is never left without levels: removing level 0 leaves a
    /// fresh empty level 0 behind.
    pub fn remove_level(&mut self, level: usize) -> CombiResult<()> {
        self.level(level)?;
        self.levels.truncate(level);
        if self.levels.is_empty() {
            self.levels.push(Level::default());
        }
        log::debug!("Removed levels from {}, {} remaining", level, self.levels.len());
        Ok(())
    }

    /// Add a group to a level
    pub fn add_group(&mut self, level: usize, kind: CombinatorKind, name: &str) -> CombiResult<GroupId> {
        let id = self.next_group_id;
        self.level_mut(level)?.groups.push(Group::new(id, kind, name));
        self.next_group_id += 1;
        Ok(id)
    }

    /// Remove a group and every reference to it from the level directly above
    pub fn remove_group(&mut self, level: usize, group: GroupId) -> CombiResult<Group> {
        let groups = &mut self.level_mut(level)?.groups;
        let index = groups
            .iter()
            .position(|g| g.id == group)
            .ok_or(CombiError::GroupNotFound { level, group })?;
        let removed = groups.remove(index);

        if let Some(parent_level) = self.levels.get_mut(level + 1) {
            for parent in &mut parent_level.groups {
                parent.elements.retain(|&child| child != group);
            }
        }
        Ok(removed)
    }

    /// Reference an element from a group.
    ///
    /// At level 0 the element must be an action of `registry`, above it must
    /// be a group of the previous level.
    pub fn add_element<R: ActionRegistry + ?Sized>(
        &mut self,
        registry: &R,
        level: usize,
        group: GroupId,
        child: usize,
    ) -> CombiResult<()> {
        let exists = if level == 0 {
            registry.contains(child)
        } else {
            self.level(level - 1)?.contains(child)
        };
        if !exists {
            return Err(CombiError::InvalidReference { level, child });
        }

        let target = self.group_mut(level, group)?;
        if target.includes(child) {
            return Err(CombiError::DuplicateElement { group, child });
        }
        target.elements.push(child);
        Ok(())
    }

    /// Drop an element reference from a group
    pub fn remove_element(&mut self, level: usize, group: GroupId, child: usize) -> CombiResult<()> {
        let target = self.group_mut(level, group)?;
        let index = target
            .elements
            .iter()
            .position(|&element| element == child)
            .ok_or(CombiError::InvalidReference { level, child })?;
        target.elements.remove(index);
        Ok(())
    }

    /// Drop every level-0 reference to an action
    pub fn strip_action(&mut self, action: ActionId) {
        if let Some(level) = self.levels.get_mut(0) {
            for group in &mut level.groups {
                group.elements.retain(|&child| child != action);
            }
        }
    }

    pub fn rename_group(&mut self, level: usize, group: GroupId, name: &str) -> CombiResult<()> {
        self.group_mut(level, group)?.name = name.to_string();
        Ok(())
    }

    pub fn set_kind(&mut self, level: usize, group: GroupId, kind: CombinatorKind) -> CombiResult<()> {
        self.group_mut(level, group)?.kind = kind;
        Ok(())
    }

    // ========================
    // Queries
    // ========================

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, level: usize) -> CombiResult<&Level> {
        self.levels.get(level).ok_or(CombiError::LevelNotFound(level))
    }

    fn level_mut(&mut self, level: usize) -> CombiResult<&mut Level> {
        self.levels.get_mut(level).ok_or(CombiError::LevelNotFound(level))
    }

    pub fn group(&self, level: usize, group: GroupId) -> CombiResult<&Group> {
        self.level(level)?
            .group(group)
            .ok_or(CombiError::GroupNotFound { level, group })
    }

    fn group_mut(&mut self, level: usize, group: GroupId) -> CombiResult<&mut Group> {
        self.level_mut(level)?
            .group_mut(group)
            .ok_or(CombiError::GroupNotFound { level, group })
    }

    /// Contiguous position of a group within its level, for display
    pub fn display_index(&self, level: usize, group: GroupId) -> Option<usize> {
        self.levels
            .get(level)?
            .groups
            .iter()
            .position(|g| g.id == group)
    }

    /// The single group of the last level
    pub fn root(&self) -> CombiResult<&Group> {
        let last = self.levels.last().ok_or(CombiError::EmptyRootLevel)?;
        match last.groups.len() {
            0 => Err(CombiError::EmptyRootLevel),
            1 => Ok(&last.groups[0]),
            n => Err(CombiError::MultipleRootGroups(n)),
        }
    }

    /// Check the hierarchy can be generated: one root group, no empty level
    /// below it and no dangling element reference.
    pub fn validate<R: ActionRegistry + ?Sized>(&self, registry: &R) -> CombiResult<()> {
        self.root()?;

        let root_level = self.levels.len() - 1;
        for (index, level) in self.levels.iter().enumerate() {
            if index < root_level && level.is_empty() {
                return Err(CombiError::Structural(format!(
                    "level {} is empty but level {} depends on it",
                    index,
                    index + 1
                )));
            }

            for group in &level.groups {
                for &child in &group.elements {
                    let exists = if index == 0 {
                        registry.contains(child)
                    } else {
                        self.levels[index - 1].contains(child)
                    };
                    if !exists {
                        return Err(CombiError::InvalidReference { level: index, child });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, ActionList};

    fn registry() -> ActionList {
        let mut actions = ActionList::new();
        actions.add(Action::self_weight());
        actions.add(Action::office());
        actions.add(Action::wind());
        actions
    }

    #[test]
    fn test_add_element_checks_level() {
        let actions = registry();
        let mut hierarchy = GroupHierarchy::new();
        let g0 = hierarchy.add_group(0, CombinatorKind::And, "Loads").unwrap();

        hierarchy.add_element(&actions, 0, g0, 1).unwrap();
        assert!(matches!(
            hierarchy.add_element(&actions, 0, g0, 7),
            Err(CombiError::InvalidReference { level: 0, child: 7 })
        ));
        assert!(matches!(
            hierarchy.add_element(&actions, 0, g0, 1),
            Err(CombiError::DuplicateElement { child: 1, .. })
        ));

        hierarchy.add_level();
        let root = hierarchy.add_group(1, CombinatorKind::Or, "Root").unwrap();
        hierarchy.add_element(&actions, 1, root, g0).unwrap();
        // Action ids are not groups of level 0
        assert!(matches!(
            hierarchy.add_element(&actions, 1, root, 2),
            Err(CombiError::InvalidReference { level: 1, child: 2 })
        ));
    }

    #[test]
    fn test_remove_group_cascades_one_level_up() {
        let actions = registry();
        let mut hierarchy = GroupHierarchy::new();
        let a = hierarchy.add_group(0, CombinatorKind::And, "A").unwrap();
        let b = hierarchy.add_group(0, CombinatorKind::Xor, "B").unwrap();
        let c = hierarchy.add_group(0, CombinatorKind::Or, "C").unwrap();
        hierarchy.add_level();
        let root = hierarchy.add_group(1, CombinatorKind::And, "Root").unwrap();
        hierarchy.add_element(&actions, 1, root, a).unwrap();
        hierarchy.add_element(&actions, 1, root, b).unwrap();
        hierarchy.add_element(&actions, 1, root, c).unwrap();

        hierarchy.remove_group(0, b).unwrap();

        assert_eq!(hierarchy.group(1, root).unwrap().elements, vec![a, c]);
        // Ids stay stable, display indices close the gap
        assert_eq!(hierarchy.display_index(0, c), Some(1));
        assert_eq!(hierarchy.group(0, c).unwrap().id, c);
        assert!(hierarchy.display_index(0, b).is_none());
    }

    #[test]
    fn test_remove_level_truncates_and_recreates() {
        let mut hierarchy = GroupHierarchy::new();
        hierarchy.add_level();
        hierarchy.add_level();
        hierarchy.remove_level(1).unwrap();
        assert_eq!(hierarchy.num_levels(), 1);

        hierarchy.add_group(0, CombinatorKind::And, "G").unwrap();
        hierarchy.remove_level(0).unwrap();
        assert_eq!(hierarchy.num_levels(), 1);
        assert!(hierarchy.level(0).unwrap().is_empty());

        assert!(matches!(hierarchy.remove_level(3), Err(CombiError::LevelNotFound(3))));
    }

    #[test]
    fn test_root_checks() {
        let mut hierarchy = GroupHierarchy::new();
        assert!(matches!(hierarchy.root(), Err(CombiError::EmptyRootLevel)));

        hierarchy.add_group(0, CombinatorKind::And, "A").unwrap();
        hierarchy.add_group(0, CombinatorKind::And, "B").unwrap();
        assert!(matches!(hierarchy.root(), Err(CombiError::MultipleRootGroups(2))));

        hierarchy.add_level();
        let root = hierarchy.add_group(1, CombinatorKind::Or, "Root").unwrap();
        assert_eq!(hierarchy.root().unwrap().id, root);
    }

    #[test]
    fn test_validate_detects_dangling_and_empty_levels() {
        let mut actions = registry();
        let mut hierarchy = GroupHierarchy::new();
        let g = hierarchy.add_group(0, CombinatorKind::And, "G").unwrap();
        hierarchy.add_element(&actions, 0, g, 2).unwrap();
        hierarchy.validate(&actions).unwrap();

        actions.remove(2).unwrap();
        assert!(matches!(
            hierarchy.validate(&actions),
            Err(CombiError::InvalidReference { level: 0, child: 2 })
        ));

        let mut hierarchy = GroupHierarchy::new();
        hierarchy.add_level();
        hierarchy.add_group(1, CombinatorKind::And, "Root").unwrap();
        assert!(matches!(hierarchy.validate(&actions), Err(CombiError::Structural(_))));
    }

    #[test]
    fn test_strip_action() {
        let actions = registry();
        let mut hierarchy = GroupHierarchy::new();
        let g = hierarchy.add_group(0, CombinatorKind::Or, "G").unwrap();
        hierarchy.add_element(&actions, 0, g, 0).unwrap();
        hierarchy.add_element(&actions, 0, g, 1).unwrap();
        hierarchy.strip_action(0);
        assert_eq!(hierarchy.group(0, g).unwrap().elements, vec![1]);
    }
}
