//! Combination generation

mod combination;
mod generator;
mod sweep;

pub use combination::{Combination, CombinationElement, CombinationSet};
pub use generator::{generate_group, MAX_OR_ELEMENTS};
pub use sweep::{predominance_passes, run_sweep, SweepContext, SweepOutput};
