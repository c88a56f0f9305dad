//! Termination criteria
//!
//! This module provides termination criteria for the generational driver.

use crate::fitness::traits::OptimizationDirection;

/// Evolution state for termination checking
#[derive(Clone, Debug)]
pub struct EvolutionState<'a> {
    /// Number of completed learn/sample cycles
    pub generation: usize,
    /// Total objective evaluations so far
    pub evaluations: usize,
    /// Best fitness found so far
    pub best_fitness: f64,
    /// Optimization direction of the objective
    pub direction: OptimizationDirection,
    /// History of best-so-far fitness values per generation
    pub fitness_history: &'a [f64],
}

/// Termination criterion trait
pub trait TerminationCriterion: Send + Sync {
    /// Check if evolution should terminate
    fn should_terminate(&self, state: &EvolutionState) -> bool;

    /// Get a description of why termination occurred
    fn reason(&self) -> &'static str;
}

/// Terminate after a maximum number of generations
#[derive(Clone, Debug)]
pub struct MaxGenerations(pub usize);

impl MaxGenerations {
    /// Create a new max generations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl TerminationCriterion for MaxGenerations {
    fn should_terminate(&self, state: &EvolutionState) -> bool {
        state.generation >= self.0
    }

    fn reason(&self) -> &'static str {
        "Maximum generations reached"
    }
}

/// Terminate after a maximum number of objective evaluations
#[derive(Clone, Debug)]
pub struct MaxEvaluations(pub usize);

impl MaxEvaluations {
    /// Create a new max evaluations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl TerminationCriterion for MaxEvaluations {
    fn should_terminate(&self, state: &EvolutionState) -> bool {
        state.evaluations >= self.0
    }

    fn reason(&self) -> &'static str {
        "Maximum evaluations reached"
    }
}

/// Terminate when the best-so-far fitness stops improving
#[derive(Clone, Debug)]
pub struct FitnessStagnation {
    /// Number of generations to look back
    pub window: usize,
    /// Minimum improvement threshold
    pub epsilon: f64,
}

impl FitnessStagnation {
    /// Create a new fitness stagnation criterion
    pub fn new(window: usize, epsilon: f64) -> Self {
        Self { window, epsilon }
    }
}

impl TerminationCriterion for FitnessStagnation {
    fn should_terminate(&self, state: &EvolutionState) -> bool {
        if self.window == 0 || state.fitness_history.len() < self.window {
            return false;
        }

        let start_idx = state.fitness_history.len() - self.window;
        let window = &state.fitness_history[start_idx..];
        let first = window[0];
        let last = window[window.len() - 1];

        (last - first).abs() < self.epsilon
    }

    fn reason(&self) -> &'static str {
        "Fitness stagnation detected"
    }
}

/// Terminate when a target fitness is reached
///
/// "Reached" follows the objective's direction: at or below the target when
/// minimizing, at or above it when maximizing.
#[derive(Clone, Debug)]
pub struct TargetFitness {
    /// Target fitness value
    pub target: f64,
    /// Tolerance for reaching target
    pub tolerance: f64,
}

impl TargetFitness {
    /// Create a new target fitness criterion
    pub fn new(target: f64) -> Self {
        Self {
            target,
            tolerance: 0.0,
        }
    }

    /// Create with a tolerance
    pub fn with_tolerance(target: f64, tolerance: f64) -> Self {
        Self { target, tolerance }
    }
}

impl TerminationCriterion for TargetFitness {
    fn should_terminate(&self, state: &EvolutionState) -> bool {
        match state.direction {
            OptimizationDirection::Minimize => state.best_fitness <= self.target + self.tolerance,
            OptimizationDirection::Maximize => state.best_fitness >= self.target - self.tolerance,
        }
    }

    fn reason(&self) -> &'static str {
        "Target fitness reached"
    }
}

/// Combine criteria with OR logic (any one triggers termination)
pub struct AnyOf {
    criteria: Vec<Box<dyn TerminationCriterion>>,
}

impl AnyOf {
    /// Create a new AnyOf combinator
    pub fn new(criteria: Vec<Box<dyn TerminationCriterion>>) -> Self {
        Self { criteria }
    }
}

impl TerminationCriterion for AnyOf {
    fn should_terminate(&self, state: &EvolutionState) -> bool {
        self.criteria.iter().any(|c| c.should_terminate(state))
    }

    fn reason(&self) -> &'static str {
        "One of multiple criteria met"
    }
}

/// Combine criteria with AND logic (all must trigger for termination)
pub struct AllOf {
    criteria: Vec<Box<dyn TerminationCriterion>>,
}

impl AllOf {
    /// Create a new AllOf combinator
    pub fn new(criteria: Vec<Box<dyn TerminationCriterion>>) -> Self {
        Self { criteria }
    }
}

impl TerminationCriterion for AllOf {
    fn should_terminate(&self, state: &EvolutionState) -> bool {
        !self.criteria.is_empty() && self.criteria.iter().all(|c| c.should_terminate(state))
    }

    fn reason(&self) -> &'static str {
        "All criteria met"
    }
}

pub mod prelude {
    pub use super::{
        AllOf, AnyOf, EvolutionState, FitnessStagnation, MaxEvaluations, MaxGenerations,
        TargetFitness, TerminationCriterion,
    };
}
