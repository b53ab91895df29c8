//! Ponderations: weighted load combinations

use std::collections::HashMap;
use std::fmt;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::actions::{ActionId, ActionRegistry, PsiFactors};
use crate::error::{CombiError, CombiResult};

/// Which ψ factor reduces an action, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PsiSelector {
    None,
    Psi0,
    Psi1,
    Psi2,
}

impl PsiSelector {
    /// ψ value picked from an action's factors (1.0 for `None`)
    pub fn value(self, psi: &PsiFactors) -> f64 {
        match self {
            Self::None => 1.0,
            Self::Psi0 => psi.psi0,
            Self::Psi1 => psi.psi1,
            Self::Psi2 => psi.psi2,
        }
    }
}

impl fmt::Display for PsiSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Psi0 => write!(f, "ψ0"),
            Self::Psi1 => write!(f, "ψ1"),
            Self::Psi2 => write!(f, "ψ2"),
        }
    }
}

/// One weighted action of a ponderation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PonderationElement {
    pub action: ActionId,
    /// Partial safety factor γ
    pub coefficient: f64,
    pub psi: PsiSelector,
}

/// A fully weighted load combination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ponderation {
    pub elements: Vec<PonderationElement>,
}

/// Order-insensitive identity of a ponderation, comparing coefficients exactly
pub(crate) type PonderationKey = Vec<(ActionId, u64, PsiSelector)>;

impl Ponderation {
    pub fn new(elements: Vec<PonderationElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[PonderationElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Coefficient applied to an action, if the action takes part
    pub fn coefficient(&self, action: ActionId) -> Option<f64> {
        self.elements
            .iter()
            .find(|element| element.action == action)
            .map(|element| element.coefficient)
    }

    pub fn includes(&self, action: ActionId) -> bool {
        self.coefficient(action).is_some()
    }

    pub(crate) fn key(&self) -> PonderationKey {
        let mut key: PonderationKey = self
            .elements
            .iter()
            .map(|element| (element.action, element.coefficient.to_bits(), element.psi))
            .collect();
        key.sort_unstable();
        key
    }

    /// Same actions with the same coefficients and ψ selectors, in any order
    pub fn same_as(&self, other: &Ponderation) -> bool {
        self.len() == other.len() && self.key() == other.key()
    }

    /// Effective factor γ·ψ of each action
    pub fn factors<R: ActionRegistry + ?Sized>(&self, registry: &R) -> CombiResult<Vec<(ActionId, f64)>> {
        self.elements
            .iter()
            .map(|element| {
                let psi = registry
                    .psi_of(element.action)
                    .ok_or(CombiError::ActionNotFound(element.action))?;
                Ok((element.action, element.coefficient * element.psi.value(&psi)))
            })
            .collect()
    }

    /// Weighted sum of per-action result vectors (displacements, forces...).
    ///
    /// Every action of the ponderation needs a vector, and all of them must
    /// share the length of the first one.
    pub fn superpose<R: ActionRegistry + ?Sized>(
        &self,
        registry: &R,
        results: &HashMap<ActionId, DVector<f64>>,
    ) -> CombiResult<DVector<f64>> {
        let mut total: Option<DVector<f64>> = None;

        for (action, factor) in self.factors(registry)? {
            let vector = results.get(&action).ok_or(CombiError::MissingResult(action))?;
            match total.as_mut() {
                None => total = Some(vector * factor),
                Some(sum) if sum.len() == vector.len() => sum.axpy(factor, vector, 1.0),
                Some(sum) => {
                    return Err(CombiError::Structural(format!(
                        "result vector of action {} has length {}, expected {}",
                        action,
                        vector.len(),
                        sum.len()
                    )))
                }
            }
        }
        Ok(total.unwrap_or_else(|| DVector::zeros(0)))
    }

    /// Human readable form, e.g. `1.35*Self weight + 1.50*ψ0*Wind`
    pub fn describe<R: ActionRegistry + ?Sized>(&self, registry: &R) -> String {
        self.elements
            .iter()
            .map(|element| {
                let name = registry
                    .action(element.action)
                    .map(|action| action.name.clone())
                    .unwrap_or_else(|| format!("#{}", element.action));
                match element.psi {
                    PsiSelector::None => format!("{:.2}*{}", element.coefficient, name),
                    psi => format!("{:.2}*{}*{}", element.coefficient, psi, name),
                }
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}
