//! Selection operators
//!
//! The UMDA learns from the elite part of each generation, chosen by
//! truncation.

use crate::fitness::traits::OptimizationDirection;

/// Truncation selection
///
/// Keeps the best `floor(len * truncation_ratio)` individuals (at least one).
#[derive(Clone, Debug)]
pub struct TruncationSelection {
    /// Fraction of population to keep (0.0, 1.0]
    pub truncation_ratio: f64,
}

impl TruncationSelection {
    /// Create a new truncation selection
    ///
    /// # Panics
    /// Panics if the ratio is not in (0, 1]
    pub fn new(truncation_ratio: f64) -> Self {
        assert!(
            truncation_ratio > 0.0 && truncation_ratio <= 1.0,
            "Truncation ratio must be in (0, 1]"
        );
        Self { truncation_ratio }
    }

    /// Number of individuals kept out of `len`
    pub fn cutoff(&self, len: usize) -> usize {
        let cutoff = ((len as f64) * self.truncation_ratio).floor() as usize;
        cutoff.clamp(1, len.max(1))
    }

    /// Indices of the selected individuals, best first
    ///
    /// Ties keep their population order; NaN fitnesses rank last.
    pub fn select(&self, fitness: &[f64], direction: OptimizationDirection) -> Vec<usize> {
        if fitness.is_empty() {
            return Vec::new();
        }

        let mut indices: Vec<usize> = (0..fitness.len()).collect();
        indices.sort_by(|&a, &b| direction.compare(fitness[a], fitness[b]));
        indices.truncate(self.cutoff(fitness.len()));
        indices
    }
}

impl Default for TruncationSelection {
    fn default() -> Self {
        Self::new(0.5)
    }
}
