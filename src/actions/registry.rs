//! Action registry

use serde::{Deserialize, Serialize};

use super::action::{Action, ActionCategory, ActionId, PsiFactors};
use crate::error::{CombiError, CombiResult};

/// Source of the actions referenced by level 0 of a group hierarchy.
///
/// The engine only reads from the registry. Predominance is tracked per
/// generation pass and never written back to the actions.
pub trait ActionRegistry: Sync {
    /// Action ids in registry order
    fn list_actions(&self) -> Vec<ActionId>;

    /// Look up an action
    fn action(&self, id: ActionId) -> Option<&Action>;

    fn category_of(&self, id: ActionId) -> Option<ActionCategory> {
        self.action(id).map(|action| action.category)
    }

    fn psi_of(&self, id: ActionId) -> Option<PsiFactors> {
        self.action(id).map(|action| action.psi)
    }

    fn contains(&self, id: ActionId) -> bool {
        self.action(id).is_some()
    }
}

/// In-memory registry keeping actions in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionList {
    actions: Vec<(ActionId, Action)>,
    next_id: ActionId,
}

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action, returning its newly assigned id
    pub fn add(&mut self, action: Action) -> ActionId {
        let id = self.next_id;
        self.actions.push((id, action));
        self.next_id += 1;
        id
    }

    /// Add an action under a caller-chosen id
    pub fn insert(&mut self, id: ActionId, action: Action) -> CombiResult<()> {
        if self.contains(id) {
            return Err(CombiError::DuplicateAction(id));
        }
        self.actions.push((id, action));
        self.next_id = self.next_id.max(id + 1);
        Ok(())
    }

    /// Remove an action and return it
    pub fn remove(&mut self, id: ActionId) -> CombiResult<Action> {
        let index = self
            .actions
            .iter()
            .position(|(action_id, _)| *action_id == id)
            .ok_or(CombiError::ActionNotFound(id))?;
        Ok(self.actions.remove(index).1)
    }

    pub fn get_mut(&mut self, id: ActionId) -> Option<&mut Action> {
        self.actions
            .iter_mut()
            .find(|(action_id, _)| *action_id == id)
            .map(|(_, action)| action)
    }

    /// Iterate over `(id, action)` pairs in registry order
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        self.actions.iter().map(|(id, action)| (*id, action))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionRegistry for ActionList {
    fn list_actions(&self) -> Vec<ActionId> {
        self.actions.iter().map(|(id, _)| *id).collect()
    }

    fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions
            .iter()
            .find(|(action_id, _)| *action_id == id)
            .map(|(_, action)| action)
    }
}
