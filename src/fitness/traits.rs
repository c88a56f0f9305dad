//! Objective traits
//!
//! This module defines the batch evaluation interface the UMDA driver
//! consumes, and the direction in which an objective is optimized.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::genome::permutation::Permutation;

/// Whether lower or higher objective values are better
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptimizationDirection {
    /// Lower is better (costs)
    #[default]
    Minimize,
    /// Higher is better (scores)
    Maximize,
}

impl OptimizationDirection {
    /// Check if `a` is strictly better than `b`
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Self::Minimize => a < b,
            Self::Maximize => a > b,
        }
    }

    /// The value every real fitness improves on
    pub fn worst_value(self) -> f64 {
        match self {
            Self::Minimize => f64::INFINITY,
            Self::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Ordering that puts better values first and NaN last
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match self {
                Self::Minimize => a.total_cmp(&b),
                Self::Maximize => b.total_cmp(&a),
            },
        }
    }

    /// Best value of a slice, ignoring NaN
    pub fn best_of(self, values: &[f64]) -> Option<f64> {
        values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .min_by(|a, b| self.compare(*a, *b))
    }
}

/// A black-box objective over permutations
///
/// Implementations must be deterministic per candidate and free of side
/// effects; the driver may evaluate candidates in parallel.
pub trait Objective: Send + Sync {
    /// Name of the problem family
    fn name(&self) -> &'static str;

    /// Permutation size `n`
    fn size(&self) -> usize;

    /// Optimization direction
    fn direction(&self) -> OptimizationDirection;

    /// Evaluate one candidate
    fn evaluate(&self, permutation: &[usize]) -> f64;

    /// Evaluate a batch of candidates, one value per candidate
    fn evaluate_batch(&self, candidates: &[Permutation]) -> Vec<f64> {
        #[cfg(feature = "parallel")]
        {
            candidates
                .par_iter()
                .map(|c| self.evaluate(c.as_slice()))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            candidates
                .iter()
                .map(|c| self.evaluate(c.as_slice()))
                .collect()
        }
    }
}

impl<O: Objective + ?Sized> Objective for Box<O> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn direction(&self) -> OptimizationDirection {
        (**self).direction()
    }

    fn evaluate(&self, permutation: &[usize]) -> f64 {
        (**self).evaluate(permutation)
    }

    fn evaluate_batch(&self, candidates: &[Permutation]) -> Vec<f64> {
        (**self).evaluate_batch(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Displacement(usize);

    impl Objective for Displacement {
        fn name(&self) -> &'static str {
            "Displacement"
        }

        fn size(&self) -> usize {
            self.0
        }

        fn direction(&self) -> OptimizationDirection {
            OptimizationDirection::Minimize
        }

        fn evaluate(&self, permutation: &[usize]) -> f64 {
            permutation
                .iter()
                .enumerate()
                .map(|(i, &v)| i.abs_diff(v) as f64)
                .sum()
        }
    }

    #[test]
    fn test_direction_is_better() {
        assert!(OptimizationDirection::Minimize.is_better(1.0, 2.0));
        assert!(!OptimizationDirection::Minimize.is_better(2.0, 2.0));
        assert!(OptimizationDirection::Maximize.is_better(3.0, 2.0));
    }

    #[test]
    fn test_direction_compare_nan_last() {
        let mut values = vec![3.0, f64::NAN, 1.0, 2.0];
        values.sort_by(|a, b| OptimizationDirection::Maximize.compare(*a, *b));
        assert_eq!(&values[..3], &[3.0, 2.0, 1.0]);
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_direction_best_of() {
        let values = [4.0, f64::NAN, -1.0, 7.0];
        assert_eq!(OptimizationDirection::Minimize.best_of(&values), Some(-1.0));
        assert_eq!(OptimizationDirection::Maximize.best_of(&values), Some(7.0));
        assert_eq!(OptimizationDirection::Minimize.best_of(&[]), None);
    }

    #[test]
    fn test_evaluate_batch_preserves_order() {
        let objective = Displacement(3);
        let candidates = vec![
            Permutation::identity(3),
            Permutation::new(vec![2, 1, 0]),
            Permutation::new(vec![1, 0, 2]),
        ];
        assert_eq!(objective.evaluate_batch(&candidates), vec![0.0, 4.0, 2.0]);

        let boxed: Box<dyn Objective> = Box::new(Displacement(3));
        assert_eq!(boxed.evaluate_batch(&candidates), vec![0.0, 4.0, 2.0]);
    }
}
