//! Predominance sweep: one generation pass per candidate predominant action

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use super::combination::Combination;
use super::generator::generate_group;
use crate::actions::{ActionId, ActionRegistry};
use crate::config::Configuration;
use crate::error::{CombiError, CombiResult};
use crate::groups::{GroupHierarchy, GroupId};
use crate::ponderations::{coefficient_plan, expand, BucketSet};

/// Scratch state of a single generation pass.
///
/// Holds the predominant action of the pass and the combinations computed
/// for every group so far. Each pass owns its context, so passes never
/// observe each other.
#[derive(Debug, Default)]
pub struct SweepContext {
    predominant: Option<ActionId>,
    combinations: HashMap<GroupId, Vec<Combination>>,
}

impl SweepContext {
    pub fn new(predominant: Option<ActionId>) -> Self {
        Self {
            predominant,
            combinations: HashMap::new(),
        }
    }

    pub fn predominant(&self) -> Option<ActionId> {
        self.predominant
    }

    pub fn is_predominant(&self, action: ActionId) -> bool {
        self.predominant == Some(action)
    }

    /// Combinations computed for a group, empty if not generated yet
    pub fn combinations(&self, group: GroupId) -> &[Combination] {
        self.combinations
            .get(&group)
            .map(|combinations| combinations.as_slice())
            .unwrap_or(&[])
    }

    /// Generate every level bottom-up and return the root combinations
    pub fn generate(&mut self, hierarchy: &GroupHierarchy) -> CombiResult<&[Combination]> {
        self.combinations.clear();
        let root_level = hierarchy.num_levels() - 1;

        for (index, level) in hierarchy.levels().iter().enumerate() {
            for group in &level.groups {
                let combinations = generate_group(self, index, group, index == root_level)?;
                self.combinations.insert(group.id, combinations);
            }
        }

        let root = hierarchy.root()?;
        Ok(self.combinations(root.id))
    }
}

/// Predominant action of each pass, in registry order.
///
/// Non-variable actions give a pass without predominant action; those passes
/// are identical so only the first is kept. There is always at least one pass.
pub fn predominance_passes<R: ActionRegistry + ?Sized>(registry: &R) -> Vec<Option<ActionId>> {
    let mut passes = Vec::new();
    let mut neutral_seen = false;

    for id in registry.list_actions() {
        let variable = registry
            .category_of(id)
            .map(|category| category.is_variable())
            .unwrap_or(false);

        if variable {
            passes.push(Some(id));
        } else if !neutral_seen {
            passes.push(None);
            neutral_seen = true;
        }
    }

    if passes.is_empty() {
        passes.push(None);
    }
    passes
}

/// Outcome of a full sweep
#[derive(Debug)]
pub struct SweepOutput {
    pub buckets: BucketSet,
    pub passes: usize,
}

/// Run every predominance pass and expand the root combinations of each into
/// ponderations. Passes are merged in registry order, so the output does not
/// depend on `config.parallel`.
pub fn run_sweep<R: ActionRegistry + ?Sized>(
    hierarchy: &GroupHierarchy,
    registry: &R,
    config: &Configuration,
    cancel: Option<&AtomicBool>,
) -> CombiResult<SweepOutput> {
    hierarchy.validate(registry)?;

    let plan = coefficient_plan(config);
    let passes = predominance_passes(registry);

    let run_pass = |predominant: &Option<ActionId>| -> CombiResult<BucketSet> {
        if cancel.map(|flag| flag.load(Ordering::Relaxed)).unwrap_or(false) {
            return Err(CombiError::Cancelled);
        }

        let mut ctx = SweepContext::new(*predominant);
        let root_combinations = ctx.generate(hierarchy)?;
        log::debug!(
            "Pass with predominant {:?}: {} root combinations",
            predominant,
            root_combinations.len()
        );

        let mut buckets = BucketSet::new();
        expand(root_combinations, registry, &plan, &mut buckets)?;
        Ok(buckets)
    };

    let results: Vec<BucketSet> = if config.parallel {
        passes.par_iter().map(run_pass).collect::<CombiResult<_>>()?
    } else {
        passes.iter().map(run_pass).collect::<CombiResult<_>>()?
    };

    let mut buckets = BucketSet::new();
    for pass in results {
        buckets.merge(pass);
    }

    Ok(SweepOutput {
        buckets,
        passes: passes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, ActionCategory, ActionList};
    use crate::groups::CombinatorKind;

    fn actions() -> ActionList {
        let mut actions = ActionList::new();
        actions.add(Action::self_weight());
        actions.add(Action::office());
        actions.add(Action::new("Crane", ActionCategory::Accidental));
        actions.add(Action::wind());
        actions
    }

    #[test]
    fn test_passes_follow_registry_order() {
        assert_eq!(predominance_passes(&actions()), vec![None, Some(1), Some(3)]);
        assert_eq!(predominance_passes(&ActionList::new()), vec![None]);
    }

    #[test]
    fn test_context_flags_single_predominant() {
        let actions = actions();
        let mut hierarchy = GroupHierarchy::new();
        let root = hierarchy.add_group(0, CombinatorKind::And, "All").unwrap();
        for id in actions.list_actions() {
            hierarchy.add_element(&actions, 0, root, id).unwrap();
        }

        let mut ctx = SweepContext::new(Some(3));
        let combinations = ctx.generate(&hierarchy).unwrap();
        assert_eq!(combinations.len(), 1);
        let flagged: Vec<_> = combinations[0]
            .elements
            .iter()
            .filter(|element| element.predominant)
            .map(|element| element.action)
            .collect();
        assert_eq!(flagged, vec![3]);
    }

    #[test]
    fn test_inner_or_loses_empty_subset() {
        let actions = actions();
        let mut hierarchy = GroupHierarchy::new();
        let variables = hierarchy.add_group(0, CombinatorKind::Or, "Variables").unwrap();
        hierarchy.add_element(&actions, 0, variables, 1).unwrap();
        hierarchy.add_element(&actions, 0, variables, 3).unwrap();
        hierarchy.add_level();
        let root = hierarchy.add_group(1, CombinatorKind::Or, "Root").unwrap();
        hierarchy.add_element(&actions, 1, root, variables).unwrap();

        let mut ctx = SweepContext::new(None);
        let root_combinations = ctx.generate(&hierarchy).unwrap().to_vec();
        assert_eq!(ctx.combinations(variables).len(), 3);
        // The root OR keeps its own empty subset
        assert_eq!(root_combinations.len(), 4);
        assert_eq!(root_combinations.iter().filter(|c| c.is_empty()).count(), 1);
    }

    #[test]
    fn test_cancelled_sweep() {
        let actions = actions();
        let mut hierarchy = GroupHierarchy::new();
        let root = hierarchy.add_group(0, CombinatorKind::Xor, "Root").unwrap();
        hierarchy.add_element(&actions, 0, root, 1).unwrap();

        let cancel = AtomicBool::new(true);
        let result = run_sweep(&hierarchy, &actions, &Configuration::default(), Some(&cancel));
        assert!(matches!(result, Err(CombiError::Cancelled)));
    }
}
