//! Expansion of combinations into ponderations

use super::buckets::{BucketSet, LimitState};
use super::coefficients::{BucketRun, Gamma};
use super::ponderation::{Ponderation, PonderationElement, PsiSelector};
use crate::actions::{ActionCategory, ActionRegistry};
use crate::combinations::Combination;
use crate::error::{CombiError, CombiResult};

/// Expand root combinations into every bucket of `plan`
pub fn expand<R: ActionRegistry + ?Sized>(
    combinations: &[Combination],
    registry: &R,
    plan: &[(LimitState, BucketRun)],
    buckets: &mut BucketSet,
) -> CombiResult<()> {
    for combination in combinations.iter().filter(|c| !c.is_empty()) {
        let categories = combination
            .actions()
            .map(|action| registry.category_of(action).ok_or(CombiError::ActionNotFound(action)))
            .collect::<CombiResult<Vec<_>>>()?;

        for (state, run) in plan {
            for ponderation in expand_combination(combination, &categories, run)? {
                buckets.insert(*state, ponderation);
            }
        }
    }
    Ok(())
}

/// Every min/max choice of one combination under one run.
///
/// Categories whose factor does not vary contribute no choice. A candidate is
/// dropped when one of its coefficients is zero, or when it carries
/// accompanying variable actions without the predominant one.
pub fn expand_combination(
    combination: &Combination,
    categories: &[ActionCategory],
    run: &BucketRun,
) -> CombiResult<Vec<Ponderation>> {
    let gammas = combination
        .elements
        .iter()
        .zip(categories)
        .map(|(element, &category)| {
            run.row
                .gamma(category)
                .ok_or(CombiError::UnknownCategory(element.action))
        })
        .collect::<CombiResult<Vec<Gamma>>>()?;

    let mut varying: Vec<ActionCategory> = Vec::new();
    for (&category, gamma) in categories.iter().zip(&gammas) {
        if gamma.varies() && !varying.contains(&category) {
            varying.push(category);
        }
    }

    let mut ponderations = Vec::new();
    'choices: for choice in 0..(1u32 << varying.len()) {
        let mut elements = Vec::with_capacity(combination.len());
        let mut has_predominant = false;
        let mut has_accompanying = false;

        for ((element, &category), gamma) in combination.elements.iter().zip(categories).zip(&gammas) {
            let use_max = varying
                .iter()
                .position(|&c| c == category)
                .map(|bit| choice & (1 << bit) != 0)
                .unwrap_or(false);
            let coefficient = if use_max { gamma.max } else { gamma.min };
            if coefficient == 0.0 {
                continue 'choices;
            }

            let psi = if category.is_variable() {
                if element.predominant {
                    has_predominant = true;
                    run.psi_predominant
                } else {
                    has_accompanying = true;
                    run.psi_accompanying
                }
            } else {
                PsiSelector::None
            };

            elements.push(PonderationElement {
                action: element.action,
                coefficient,
                psi,
            });
        }

        if has_accompanying && !has_predominant {
            continue;
        }
        ponderations.push(Ponderation::new(elements));
    }
    Ok(ponderations)
}
