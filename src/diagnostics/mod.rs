//! Diagnostics and statistics
//!
//! This module provides statistics collection for UMDA runs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fitness::traits::OptimizationDirection;
use crate::genome::permutation::Permutation;

/// Statistics for a single generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number
    pub generation: usize,
    /// Total objective evaluations so far
    pub evaluations: usize,
    /// Best fitness in this generation
    pub best_fitness: f64,
    /// Best fitness seen in this run up to and including this generation
    pub best_so_far: f64,
    /// Worst fitness in this generation
    pub worst_fitness: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Fitness standard deviation
    pub fitness_std: f64,
    /// Timing information
    pub timing: TimingStats,
}

/// Timing statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimingStats {
    /// Time spent on objective evaluation (ms)
    pub evaluation_ms: f64,
    /// Time spent on selection and model learning (ms)
    pub learning_ms: f64,
    /// Time spent sampling the next population (ms)
    pub sampling_ms: f64,
    /// Total generation time (ms)
    pub total_ms: f64,
}

impl TimingStats {
    /// Create new timing stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Set evaluation time
    pub fn with_evaluation(mut self, duration: Duration) -> Self {
        self.evaluation_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Set learning time
    pub fn with_learning(mut self, duration: Duration) -> Self {
        self.learning_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Set sampling time
    pub fn with_sampling(mut self, duration: Duration) -> Self {
        self.sampling_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Set total time
    pub fn with_total(mut self, duration: Duration) -> Self {
        self.total_ms = duration.as_secs_f64() * 1000.0;
        self
    }
}

impl GenerationStats {
    /// Compute statistics from one generation's fitness values
    ///
    /// NaN values are ignored. `best_so_far` starts equal to `best_fitness`.
    pub fn from_fitness(
        fitness: &[f64],
        direction: OptimizationDirection,
        generation: usize,
        evaluations: usize,
    ) -> Self {
        let values: Vec<f64> = fitness.iter().copied().filter(|f| !f.is_nan()).collect();

        if values.is_empty() {
            let worst = direction.worst_value();
            return Self {
                generation,
                evaluations,
                best_fitness: worst,
                best_so_far: worst,
                worst_fitness: worst,
                mean_fitness: 0.0,
                fitness_std: 0.0,
                timing: TimingStats::default(),
            };
        }

        let best = direction.best_of(&values).unwrap_or(direction.worst_value());
        let worst = values
            .iter()
            .copied()
            .max_by(|a, b| direction.compare(*a, *b))
            .unwrap_or(direction.worst_value());
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance = if values.len() > 1 {
            values.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
        } else {
            0.0
        };

        Self {
            generation,
            evaluations,
            best_fitness: best,
            best_so_far: best,
            worst_fitness: worst,
            mean_fitness: mean,
            fitness_std: variance.sqrt(),
            timing: TimingStats::default(),
        }
    }

    /// Set the best-so-far value
    pub fn with_best_so_far(mut self, best_so_far: f64) -> Self {
        self.best_so_far = best_so_far;
        self
    }

    /// Set timing information
    pub fn with_timing(mut self, timing: TimingStats) -> Self {
        self.timing = timing;
        self
    }
}

/// Statistics collector for an entire run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Statistics per generation
    pub generations: Vec<GenerationStats>,
    /// Total runtime in milliseconds
    pub total_runtime_ms: f64,
    /// Reason for termination
    pub termination_reason: Option<String>,
}

impl EvolutionStats {
    /// Create a new stats collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation's statistics
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Get the number of generations recorded
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Get the final best-so-far fitness
    pub fn final_best_fitness(&self) -> Option<f64> {
        self.generations.last().map(|g| g.best_so_far)
    }

    /// Get the history of best-so-far fitness values
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.best_so_far).collect()
    }

    /// Get the history of mean fitness values
    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.mean_fitness).collect()
    }

    /// Set the termination reason
    pub fn set_termination_reason(&mut self, reason: &str) {
        self.termination_reason = Some(reason.to_string());
    }

    /// Set the total runtime
    pub fn set_runtime(&mut self, duration: Duration) {
        self.total_runtime_ms = duration.as_secs_f64() * 1000.0;
    }

    /// Get a summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Evolution Summary:\n\
             - Generations: {}\n\
             - Best fitness: {:.6}\n\
             - Runtime: {:.2}ms\n\
             - Termination: {}",
            self.num_generations(),
            self.final_best_fitness().unwrap_or(f64::NAN),
            self.total_runtime_ms,
            self.termination_reason.as_deref().unwrap_or("unknown")
        )
    }
}

/// Result of a UMDA run
#[derive(Clone, Debug)]
pub struct EvolutionResult {
    /// The best permutation found (as evaluated by the objective)
    pub best_genome: Permutation,
    /// The best fitness value
    pub best_fitness: f64,
    /// Number of completed learn/sample cycles
    pub generations: usize,
    /// Total objective evaluations
    pub evaluations: usize,
    /// Statistics for the run
    pub stats: EvolutionStats,
}

impl EvolutionResult {
    /// Create a new evolution result
    pub fn new(
        best_genome: Permutation,
        best_fitness: f64,
        generations: usize,
        evaluations: usize,
    ) -> Self {
        Self {
            best_genome,
            best_fitness,
            generations,
            evaluations,
            stats: EvolutionStats::new(),
        }
    }

    /// Add statistics to the result
    pub fn with_stats(mut self, stats: EvolutionStats) -> Self {
        self.stats = stats;
        self
    }
}

pub mod prelude {
    pub use super::{EvolutionResult, EvolutionStats, GenerationStats, TimingStats};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_stats_minimize() {
        let stats = GenerationStats::from_fitness(
            &[10.0, 20.0, 30.0, 40.0, 50.0],
            OptimizationDirection::Minimize,
            10,
            100,
        );

        assert_eq!(stats.generation, 10);
        assert_eq!(stats.evaluations, 100);
        assert_eq!(stats.best_fitness, 10.0);
        assert_eq!(stats.best_so_far, 10.0);
        assert_eq!(stats.worst_fitness, 50.0);
        assert_eq!(stats.mean_fitness, 30.0);
        assert!(stats.fitness_std > 15.0 && stats.fitness_std < 16.0);
    }

    #[test]
    fn test_generation_stats_maximize_ignores_nan() {
        let stats = GenerationStats::from_fitness(
            &[1.0, f64::NAN, 3.0],
            OptimizationDirection::Maximize,
            0,
            3,
        );
        assert_eq!(stats.best_fitness, 3.0);
        assert_eq!(stats.worst_fitness, 1.0);
        assert_eq!(stats.mean_fitness, 2.0);
    }

    #[test]
    fn test_generation_stats_empty() {
        let stats = GenerationStats::from_fitness(&[], OptimizationDirection::Minimize, 0, 0);
        assert_eq!(stats.best_fitness, f64::INFINITY);
    }

    #[test]
    fn test_evolution_stats_history() {
        let mut stats = EvolutionStats::new();
        for (i, value) in [5.0, 4.0, 4.0, 2.0].iter().enumerate() {
            let gen_stats =
                GenerationStats::from_fitness(&[*value, 10.0], OptimizationDirection::Minimize, i, i * 2);
            stats.record(gen_stats);
        }

        assert_eq!(stats.num_generations(), 4);
        assert_eq!(stats.best_fitness_history(), vec![5.0, 4.0, 4.0, 2.0]);
        assert_eq!(stats.mean_fitness_history(), vec![7.5, 7.0, 7.0, 6.0]);
        assert_eq!(stats.final_best_fitness(), Some(2.0));
    }

    #[test]
    fn test_evolution_stats_summary() {
        let mut stats = EvolutionStats::new();
        stats.record(
            GenerationStats::from_fitness(&[50.0], OptimizationDirection::Maximize, 0, 1)
                .with_best_so_far(60.0),
        );
        stats.set_termination_reason("Target reached");
        stats.set_runtime(Duration::from_millis(1234));

        let summary = stats.summary();
        assert!(summary.contains("Generations: 1"));
        assert!(summary.contains("Best fitness: 60"));
        assert!(summary.contains("Target reached"));
    }

    #[test]
    fn test_timing_stats() {
        let timing = TimingStats::new()
            .with_evaluation(Duration::from_millis(100))
            .with_learning(Duration::from_millis(20))
            .with_sampling(Duration::from_millis(30))
            .with_total(Duration::from_millis(150));

        assert!((timing.evaluation_ms - 100.0).abs() < 0.1);
        assert!((timing.learning_ms - 20.0).abs() < 0.1);
        assert!((timing.sampling_ms - 30.0).abs() < 0.1);
        assert!((timing.total_ms - 150.0).abs() < 0.1);
    }

    #[test]
    fn test_evolution_result() {
        let result = EvolutionResult::new(Permutation::identity(3), 42.0, 100, 1000)
            .with_stats(EvolutionStats::new());

        assert_eq!(result.best_fitness, 42.0);
        assert_eq!(result.generations, 100);
        assert_eq!(result.evaluations, 1000);
    }
}
