//! AND / OR / XOR combination rules

use std::borrow::Cow;

use super::combination::{Combination, CombinationSet};
use super::sweep::SweepContext;
use crate::error::{CombiError, CombiResult};
use crate::groups::{CombinatorKind, Group};

/// Largest OR group whose subsets are enumerated
pub const MAX_OR_ELEMENTS: usize = 20;

/// Compute the combinations of `group`, located at `level`, from the
/// combinations its elements already hold in `ctx`.
pub fn generate_group(
    ctx: &SweepContext,
    level: usize,
    group: &Group,
    is_root: bool,
) -> CombiResult<Vec<Combination>> {
    let sets = contributions(ctx, level, group);

    let combinations = match group.kind {
        CombinatorKind::And => combine_and(&sets),
        CombinatorKind::Or => {
            if sets.len() > MAX_OR_ELEMENTS {
                return Err(CombiError::Structural(format!(
                    "OR group '{}' has {} elements, at most {} are supported",
                    group.name,
                    sets.len(),
                    MAX_OR_ELEMENTS
                )));
            }
            // The empty subset only survives at the root
            combine_or(&sets, is_root)
        }
        CombinatorKind::Xor => combine_xor(&sets),
    };

    log::trace!(
        "Level {} group '{}' ({:?}): {} combinations",
        level,
        group.name,
        group.kind,
        combinations.len()
    );
    Ok(combinations)
}

/// Combination set contributed by each element of a group
fn contributions<'a>(ctx: &'a SweepContext, level: usize, group: &Group) -> Vec<Cow<'a, [Combination]>> {
    group
        .elements
        .iter()
        .map(|&child| {
            if level == 0 {
                Cow::Owned(vec![Combination::single(child, ctx.is_predominant(child))])
            } else {
                Cow::Borrowed(ctx.combinations(child))
            }
        })
        .collect()
}

/// Fuse one combination from each set, for every choice
fn cartesian(sets: &[&[Combination]]) -> Vec<Combination> {
    let mut fused = vec![Combination::new()];
    for set in sets {
        let mut next = Vec::with_capacity(fused.len() * set.len());
        for partial in &fused {
            for combination in set.iter() {
                let mut extended = partial.clone();
                extended.fuse(combination);
                next.push(extended);
            }
        }
        fused = next;
    }
    fused
}

/// Cartesian product of the element sets, empty if any set is empty
pub(crate) fn combine_and(sets: &[Cow<'_, [Combination]>]) -> Vec<Combination> {
    if sets.is_empty() || sets.iter().any(|set| set.is_empty()) {
        return Vec::new();
    }

    let borrowed: Vec<&[Combination]> = sets.iter().map(|set| &**set).collect();
    let mut result = CombinationSet::new();
    for combination in cartesian(&borrowed) {
        if !combination.is_empty() {
            result.insert(combination);
        }
    }
    result.into_vec()
}

/// Every subset of the elements, AND-fused.
///
/// Callers keep `sets.len()` within [`MAX_OR_ELEMENTS`].
pub(crate) fn combine_or(sets: &[Cow<'_, [Combination]>], keep_empty: bool) -> Vec<Combination> {
    let mut result = CombinationSet::new();
    for pattern in 0..(1u64 << sets.len()) {
        let selected: Vec<&[Combination]> = sets
            .iter()
            .enumerate()
            .filter(|(bit, set)| pattern & (1u64 << *bit) != 0 && !set.is_empty())
            .map(|(_, set)| &**set)
            .collect();

        for combination in cartesian(&selected) {
            if combination.is_empty() && !keep_empty {
                continue;
            }
            result.insert(combination);
        }
    }
    result.into_vec()
}

/// Union of the element sets, without fusion
pub(crate) fn combine_xor(sets: &[Cow<'_, [Combination]>]) -> Vec<Combination> {
    let mut result = CombinationSet::new();
    for combination in sets.iter().flat_map(|set| set.iter()) {
        if !combination.is_empty() {
            result.insert(combination.clone());
        }
    }
    result.into_vec()
}
