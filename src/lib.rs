//! Combi Engine - Eurocode load combinations and ponderations
//!
//! This library generates the load combinations of EN 1990 from a
//! hierarchy of actions and groups, supporting:
//! - AND / OR / XOR groups nested over any number of levels
//! - One generation pass per predominant variable action
//! - Partial factors for the ELU (EQU, STR, GEO, FAT, ACC, SIS) and
//!   ELS (characteristic, frequent, quasi-permanent) limit states
//! - EU recommended values and the French national annex
//!
//! ## Example
//! ```rust
//! use combi_engine::prelude::*;
//!
//! let mut project = Project::new();
//!
//! // Add actions
//! let g = project.add_action(Action::self_weight());
//! let q = project.add_action(Action::office());
//!
//! // Both actions act together
//! let root = project.add_group(0, CombinatorKind::And, "Building").unwrap();
//! project.add_element(0, root, g).unwrap();
//! project.add_element(0, root, q).unwrap();
//!
//! // Generate
//! project.generate().unwrap();
//!
//! // Get results
//! let characteristic = project.bucket(LimitState::ElsCar);
//! assert_eq!(characteristic.len(), 1);
//! ```

pub mod actions;
pub mod combinations;
pub mod config;
pub mod error;
pub mod groups;
pub mod ponderations;
pub mod project;
pub mod request;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::actions::{
        Action, ActionCategory, ActionId, ActionKind, ActionList, ActionRegistry, ImposedCategory,
        PsiFactors,
    };
    pub use crate::config::{
        AccidentalPsi, Configuration, Country, EquilibriumMode, GeoApproach, StrGeoFormula,
    };
    pub use crate::error::{CombiError, CombiResult};
    pub use crate::groups::{CombinatorKind, GroupHierarchy, GroupId};
    pub use crate::ponderations::{
        LimitState, Ponderation, PonderationElement, Ponderations, PsiSelector,
    };
    pub use crate::project::Project;
    pub use crate::results::GenerationSummary;
}

#[cfg(feature = "wasm")]
pub mod wasm;
