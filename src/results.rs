//! Result types for ponderation generation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ponderations::{LimitState, Ponderations};

/// Overview of a generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Number of predominance passes run
    pub passes: usize,
    /// Ponderations per limit state
    pub counts: BTreeMap<LimitState, usize>,
    /// Total number of ponderations
    pub total: usize,
}

impl GenerationSummary {
    pub fn new(passes: usize, ponderations: &Ponderations) -> Self {
        let counts: BTreeMap<LimitState, usize> = ponderations
            .iter()
            .map(|(state, bucket)| (state, bucket.len()))
            .collect();
        Self {
            passes,
            total: counts.values().sum(),
            counts,
        }
    }

    /// Ponderations generated for a limit state
    pub fn count(&self, state: LimitState) -> usize {
        self.counts.get(&state).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = GenerationSummary::new(1, &Ponderations::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.counts.len(), 9);
        assert_eq!(summary.count(LimitState::EluAcc), 0);
    }
}
