//! Project - actions, group hierarchy and generated ponderations

use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionId, ActionList};
use crate::combinations::run_sweep;
use crate::config::Configuration;
use crate::error::CombiResult;
use crate::groups::{CombinatorKind, Group, GroupHierarchy, GroupId};
use crate::ponderations::{LimitState, Ponderation, Ponderations};
use crate::results::GenerationSummary;

/// A project holding everything needed to generate ponderations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    /// Action registry
    pub actions: ActionList,
    /// Group hierarchy built on the actions
    pub groups: GroupHierarchy,
    /// Generation options
    pub config: Configuration,

    /// Output of the last successful generation
    #[serde(skip)]
    ponderations: Ponderations,
}

impl Project {
    /// Create an empty project with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Configuration) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add an action to the registry
    pub fn add_action(&mut self, action: Action) -> ActionId {
        self.actions.add(action)
    }

    /// Remove an action and every level-0 reference to it
    pub fn remove_action(&mut self, id: ActionId) -> CombiResult<Action> {
        let action = self.actions.remove(id)?;
        self.groups.strip_action(id);
        Ok(action)
    }

    pub fn add_level(&mut self) -> usize {
        self.groups.add_level()
    }

    pub fn remove_level(&mut self, level: usize) -> CombiResult<()> {
        self.groups.remove_level(level)
    }

    pub fn add_group(&mut self, level: usize, kind: CombinatorKind, name: &str) -> CombiResult<GroupId> {
        self.groups.add_group(level, kind, name)
    }

    pub fn remove_group(&mut self, level: usize, group: GroupId) -> CombiResult<Group> {
        self.groups.remove_group(level, group)
    }

    /// Reference an action (level 0) or a group of the level below
    pub fn add_element(&mut self, level: usize, group: GroupId, child: usize) -> CombiResult<()> {
        self.groups.add_element(&self.actions, level, group, child)
    }

    pub fn remove_element(&mut self, level: usize, group: GroupId, child: usize) -> CombiResult<()> {
        self.groups.remove_element(level, group, child)
    }

    // ========================
    // Generation
    // ========================

    /// Generate the ponderations of every limit state.
    ///
    /// On error the ponderations of the previous run are left untouched.
    pub fn generate(&mut self) -> CombiResult<GenerationSummary> {
        self.run(None)
    }

    /// Same as [`Project::generate`], giving up between two passes once
    /// `cancel` is set
    pub fn generate_with_cancel(&mut self, cancel: &AtomicBool) -> CombiResult<GenerationSummary> {
        self.run(Some(cancel))
    }

    fn run(&mut self, cancel: Option<&AtomicBool>) -> CombiResult<GenerationSummary> {
        let output = run_sweep(&self.groups, &self.actions, &self.config, cancel).map_err(|e| {
            log::warn!("Ponderation generation failed: {}", e);
            e
        })?;

        self.ponderations = output.buckets.into_ponderations();
        let summary = GenerationSummary::new(output.passes, &self.ponderations);
        log::info!(
            "Generated {} ponderations in {} passes",
            summary.total,
            summary.passes
        );
        Ok(summary)
    }

    // ========================
    // Result Access Methods
    // ========================

    pub fn ponderations(&self) -> &Ponderations {
        &self.ponderations
    }

    /// Ponderations of one limit state
    pub fn bucket(&self, state: LimitState) -> &[Ponderation] {
        self.ponderations.bucket(state)
    }

    /// Drop generated ponderations
    pub fn clear_ponderations(&mut self) {
        self.ponderations.clear();
    }

    /// Textual form of every ponderation of a limit state
    pub fn describe(&self, state: LimitState) -> Vec<String> {
        self.bucket(state)
            .iter()
            .map(|ponderation| ponderation.describe(&self.actions))
            .collect()
    }

    // ========================
    // Persistence
    // ========================

    /// Serialize actions, hierarchy and options (not the ponderations)
    pub fn to_json(&self) -> CombiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> CombiResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
