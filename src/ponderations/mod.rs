//! Ponderations and the limit-state buckets holding them

mod buckets;
mod coefficients;
mod expander;
mod ponderation;

pub use buckets::{BucketSet, LimitState, Ponderations};
pub use coefficients::{coefficient_plan, BucketRun, CoefficientRow, Gamma};
pub use expander::{expand, expand_combination};
pub use ponderation::{Ponderation, PonderationElement, PsiSelector};
