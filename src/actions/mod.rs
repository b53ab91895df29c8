//! Actions and the registry they live in

mod action;
mod registry;

pub use action::{Action, ActionCategory, ActionId, ActionKind, ImposedCategory, PsiFactors};
pub use registry::{ActionList, ActionRegistry};
