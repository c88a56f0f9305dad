//! Univariate Marginal Distribution Algorithm (UMDA) for permutations
//!
//! UMDA assumes independence between positions. For permutation problems it
//! estimates, for every position, a categorical distribution over the values
//! `0..n` and samples new individuals from the product of these marginals.
//!
//! Independent per-position draws do not produce permutations, so two
//! strategies are offered:
//! - learn on count vectors produced by a [`PermutationCodec`], where any
//!   in-range combination decodes to a permutation
//! - learn on permutations directly and sample sequentially, restricting each
//!   position to the values not used yet

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{EvolutionResult, EvolutionStats, GenerationStats, TimingStats};
use crate::error::{EvolutionError, ModelError};
use crate::fitness::traits::Objective;
use crate::genome::permutation::Permutation;
use crate::operators::selection::TruncationSelection;
use crate::termination::{EvolutionState, MaxGenerations, TerminationCriterion};
use crate::transform::{CodecConfig, PermutationCodec, Representation};

/// Additive smoothing applied to the restricted row in [`UnivariatePermutationModel::sample_permu`]
///
/// Keeps every still-available value drawable when the learned mass on the
/// available values has collapsed to zero.
pub const SAMPLING_SMOOTHING: f64 = 1e-5;

/// Order in which positions are assigned during permutation sampling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleOrder {
    /// Positions `n-1, n-2, ..., 0`
    Left,
    /// Positions `0, 1, ..., n-1`
    #[default]
    Right,
    /// A fresh uniformly random order on every call
    Random,
}

impl SampleOrder {
    /// Position processing order for a model of dimension `n`
    pub fn positions<R: Rng>(self, n: usize, rng: &mut R) -> Vec<usize> {
        match self {
            SampleOrder::Right => (0..n).collect(),
            SampleOrder::Left => (0..n).rev().collect(),
            SampleOrder::Random => {
                let mut order: Vec<usize> = (0..n).collect();
                order.shuffle(rng);
                order
            }
        }
    }
}

// ============================================================================
// Univariate categorical model
// ============================================================================

/// Per-position categorical model over the alphabet `0..n`
///
/// Row `i` of the distribution is the probability of each value at position
/// `i`. The model is empty until the first [`learn`](Self::learn); every
/// successful `learn` replaces it entirely.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "StoredModel")]
pub struct UnivariatePermutationModel {
    distribution: Option<Vec<Vec<f64>>>,
}

/// Unchecked wire form of [`UnivariatePermutationModel`]
#[derive(Deserialize)]
struct StoredModel {
    distribution: Option<Vec<Vec<f64>>>,
}

/// Tolerance on row sums when accepting a stored distribution
const ROW_SUM_TOLERANCE: f64 = 1e-6;

impl TryFrom<StoredModel> for UnivariatePermutationModel {
    type Error = ModelError;

    fn try_from(stored: StoredModel) -> Result<Self, Self::Error> {
        if let Some(distribution) = &stored.distribution {
            let n = distribution.len();
            for (row, values) in distribution.iter().enumerate() {
                if values.len() != n {
                    return Err(ModelError::RowLength {
                        row,
                        expected: n,
                        actual: values.len(),
                    });
                }
                let sum: f64 = values.iter().sum();
                if values.iter().any(|p| !(p.is_finite() && *p >= 0.0))
                    || (sum - 1.0).abs() > ROW_SUM_TOLERANCE
                {
                    return Err(ModelError::NotStochastic { row, sum });
                }
            }
        }
        Ok(Self {
            distribution: stored.distribution,
        })
    }
}

impl UnivariatePermutationModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `learn` has succeeded at least once
    pub fn is_learned(&self) -> bool {
        self.distribution.is_some()
    }

    /// Dimension `n` of the learned model
    pub fn dimension(&self) -> Option<usize> {
        self.distribution.as_ref().map(Vec::len)
    }

    /// The learned `n × n` distribution, one row per position
    pub fn distribution(&self) -> Option<&[Vec<f64>]> {
        self.distribution.as_deref()
    }

    fn learned(&self) -> Result<&[Vec<f64>], ModelError> {
        self.distribution.as_deref().ok_or(ModelError::NotLearned)
    }

    /// Fit the marginals to a population of equal-length vectors with entries in `[0, n)`
    ///
    /// On error the previously learned state is left untouched.
    pub fn learn<V: AsRef<[usize]>>(&mut self, population: &[V]) -> Result<(), ModelError> {
        let n = population
            .first()
            .ok_or(ModelError::EmptyPopulation)?
            .as_ref()
            .len();

        let mut counts = vec![vec![0.0f64; n]; n];
        for (index, individual) in population.iter().enumerate() {
            let individual = individual.as_ref();
            if individual.len() != n {
                return Err(ModelError::DimensionMismatch {
                    index,
                    expected: n,
                    actual: individual.len(),
                });
            }
            for (position, &value) in individual.iter().enumerate() {
                if value >= n {
                    return Err(ModelError::ValueOutOfRange {
                        index,
                        position,
                        value,
                        dimension: n,
                    });
                }
                counts[position][value] += 1.0;
            }
        }

        for (position, row) in counts.iter_mut().enumerate() {
            let total: f64 = row.iter().sum();
            if total <= 0.0 {
                return Err(ModelError::DegenerateRow(position));
            }
            for p in row.iter_mut() {
                *p /= total;
            }
        }

        log::debug!(
            "Learned univariate model of dimension {} from {} individuals",
            n,
            population.len()
        );
        self.distribution = Some(counts);
        Ok(())
    }

    /// Draw every position independently from its marginal
    ///
    /// The result may repeat values; use it in an encoded vector space.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<Vec<usize>, ModelError> {
        self.learned()?
            .iter()
            .map(|row| -> Result<usize, ModelError> {
                let dist =
                    WeightedIndex::new(row).map_err(|e| ModelError::Sampling(e.to_string()))?;
                Ok(dist.sample(rng))
            })
            .collect()
    }

    /// Draw a permutation by assigning positions sequentially in `order`
    ///
    /// Each position draws from its learned row restricted to the values not
    /// used yet, plus [`SAMPLING_SMOOTHING`], renormalized with NaN mapped to
    /// zero. The result is always a permutation of `0..n`.
    pub fn sample_permu<R: Rng>(
        &self,
        order: SampleOrder,
        rng: &mut R,
    ) -> Result<Vec<usize>, ModelError> {
        let distribution = self.learned()?;
        let n = distribution.len();

        let mut available = vec![true; n];
        let mut permutation = vec![0; n];
        let mut candidates = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);

        for position in order.positions(n, rng) {
            candidates.clear();
            weights.clear();
            for (value, &p) in distribution[position].iter().enumerate() {
                if available[value] {
                    candidates.push(value);
                    weights.push(p + SAMPLING_SMOOTHING);
                }
            }
            normalize_sanitized(&mut weights);

            if candidates.is_empty() {
                return Err(ModelError::Sampling(format!(
                    "no values left to place at position {}",
                    position
                )));
            }

            let value = match WeightedIndex::new(&weights) {
                Ok(dist) => candidates[dist.sample(rng)],
                Err(e) => {
                    log::warn!(
                        "Restricted row {} is degenerate ({}); drawing uniformly",
                        position,
                        e
                    );
                    candidates[rng.gen_range(0..candidates.len())]
                }
            };

            permutation[position] = value;
            available[value] = false;
        }

        Ok(permutation)
    }

    /// Draw `count` independent vectors
    pub fn sample_many<R: Rng>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec<usize>>, ModelError> {
        (0..count).map(|_| self.sample(rng)).collect()
    }

    /// Draw `count` permutations
    pub fn sample_permu_many<R: Rng>(
        &self,
        count: usize,
        order: SampleOrder,
        rng: &mut R,
    ) -> Result<Vec<Vec<usize>>, ModelError> {
        (0..count).map(|_| self.sample_permu(order, rng)).collect()
    }
}

/// Scale to unit sum and map NaN to zero
fn normalize_sanitized(weights: &mut [f64]) {
    let total: f64 = weights.iter().sum();
    for w in weights.iter_mut() {
        let p = *w / total;
        *w = if p.is_nan() { 0.0 } else { p };
    }
}

// ============================================================================
// Generational driver
// ============================================================================

/// Space in which the model is learned and sampled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelSpace {
    /// Encode elites with a codec, learn, sample independently, decode
    Vector(CodecConfig),
    /// Learn on permutations and sample with [`UnivariatePermutationModel::sample_permu`]
    ///
    /// With [`Representation::Inverse`] the objective scores the inverse of
    /// each sampled permutation.
    Permutation {
        order: SampleOrder,
        representation: Representation,
    },
}

/// Defaults to left-order sampling on direct permutations
impl Default for ModelSpace {
    fn default() -> Self {
        ModelSpace::Permutation {
            order: SampleOrder::Left,
            representation: Representation::Direct,
        }
    }
}

/// Configuration for UMDA
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UMDAConfig {
    /// Population size
    pub population_size: usize,
    /// Fraction of the population selected for model learning
    pub selection_ratio: f64,
    /// Learning/sampling space
    pub model_space: ModelSpace,
}

impl Default for UMDAConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            selection_ratio: 0.5,
            model_space: ModelSpace::default(),
        }
    }
}

/// Builder for UMDA
pub struct UMDABuilder<Obj, Term> {
    config: UMDAConfig,
    objective: Option<Obj>,
    termination: Option<Term>,
}

impl UMDABuilder<(), ()> {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: UMDAConfig::default(),
            objective: None,
            termination: None,
        }
    }
}

impl Default for UMDABuilder<(), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Obj, Term> UMDABuilder<Obj, Term> {
    /// Replace the whole configuration
    pub fn config(mut self, config: UMDAConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the selection ratio
    pub fn selection_ratio(mut self, ratio: f64) -> Self {
        self.config.selection_ratio = ratio;
        self
    }

    /// Set the model space
    pub fn model_space(mut self, model_space: ModelSpace) -> Self {
        self.config.model_space = model_space;
        self
    }

    /// Set the objective
    pub fn objective<NewObj>(self, objective: NewObj) -> UMDABuilder<NewObj, Term>
    where
        NewObj: Objective,
    {
        UMDABuilder {
            config: self.config,
            objective: Some(objective),
            termination: self.termination,
        }
    }

    /// Set the termination criterion
    pub fn termination<NewTerm>(self, termination: NewTerm) -> UMDABuilder<Obj, NewTerm>
    where
        NewTerm: TerminationCriterion,
    {
        UMDABuilder {
            config: self.config,
            objective: self.objective,
            termination: Some(termination),
        }
    }

    /// Set max generations (convenience method)
    pub fn max_generations(self, max: usize) -> UMDABuilder<Obj, MaxGenerations> {
        self.termination(MaxGenerations::new(max))
    }
}

impl<Obj, Term> UMDABuilder<Obj, Term>
where
    Obj: Objective,
    Term: TerminationCriterion,
{
    /// Build the UMDA instance
    pub fn build(self) -> Result<PermutationUMDA<Obj, Term>, EvolutionError> {
        if self.config.population_size < 2 {
            return Err(EvolutionError::Configuration(format!(
                "Population size must be at least 2, got {}",
                self.config.population_size
            )));
        }
        if !(self.config.selection_ratio > 0.0 && self.config.selection_ratio <= 1.0) {
            return Err(EvolutionError::Configuration(format!(
                "Selection ratio must be in (0, 1], got {}",
                self.config.selection_ratio
            )));
        }

        let objective = self.objective.ok_or_else(|| {
            EvolutionError::Configuration("Objective must be specified".to_string())
        })?;

        let termination = self.termination.ok_or_else(|| {
            EvolutionError::Configuration("Termination criterion must be specified".to_string())
        })?;

        Ok(PermutationUMDA {
            config: self.config,
            objective,
            termination,
        })
    }
}

/// UMDA over permutations
pub struct PermutationUMDA<Obj, Term> {
    config: UMDAConfig,
    objective: Obj,
    termination: Term,
}

impl PermutationUMDA<(), ()> {
    /// Create a builder for UMDA
    pub fn builder() -> UMDABuilder<(), ()> {
        UMDABuilder::new()
    }
}

impl<Obj, Term> PermutationUMDA<Obj, Term>
where
    Obj: Objective,
    Term: TerminationCriterion,
{
    /// The run configuration
    pub fn config(&self) -> &UMDAConfig {
        &self.config
    }

    fn evaluates_inverse(&self) -> bool {
        matches!(
            self.config.model_space,
            ModelSpace::Permutation {
                representation: Representation::Inverse,
                ..
            }
        )
    }

    fn evaluate(&self, phenotypes: &[Permutation]) -> Result<Vec<f64>, EvolutionError> {
        let fitness = self.objective.evaluate_batch(phenotypes);
        if fitness.len() != phenotypes.len() {
            return Err(EvolutionError::FitnessEvaluation(format!(
                "objective returned {} values for {} candidates",
                fitness.len(),
                phenotypes.len()
            )));
        }
        Ok(fitness)
    }

    fn learn(
        &self,
        model: &mut UnivariatePermutationModel,
        elites: &[&Permutation],
    ) -> Result<(), EvolutionError> {
        match self.config.model_space {
            ModelSpace::Vector(codec_config) => {
                let encoded = PermutationCodec::new(codec_config).encode_all(elites)?;
                model.learn(&encoded)?;
            }
            ModelSpace::Permutation { .. } => model.learn(elites)?,
        }
        Ok(())
    }

    fn sample_population<R: Rng>(
        &self,
        model: &UnivariatePermutationModel,
        rng: &mut R,
    ) -> Result<Vec<Permutation>, EvolutionError> {
        let size = self.config.population_size;
        match self.config.model_space {
            ModelSpace::Vector(codec_config) => {
                let codec = PermutationCodec::new(codec_config);
                (0..size)
                    .map(|_| -> Result<Permutation, EvolutionError> {
                        let vector = model.sample(rng)?;
                        Ok(Permutation::try_new(codec.decode(&vector)?)?)
                    })
                    .collect()
            }
            ModelSpace::Permutation { order, .. } => (0..size)
                .map(|_| -> Result<Permutation, EvolutionError> {
                    Ok(Permutation::try_new(model.sample_permu(order, rng)?)?)
                })
                .collect(),
        }
    }

    /// Run the UMDA algorithm
    ///
    /// Each call owns a fresh model; runs never share state.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<EvolutionResult, EvolutionError> {
        let start_time = Instant::now();
        let n = self.objective.size();
        let direction = self.objective.direction();
        let selection = TruncationSelection::new(self.config.selection_ratio);

        log::info!(
            "Starting UMDA on {} (n = {}, population = {}, model space = {:?})",
            self.objective.name(),
            n,
            self.config.population_size,
            self.config.model_space
        );

        let mut model = UnivariatePermutationModel::new();
        let mut population: Vec<Permutation> = (0..self.config.population_size)
            .map(|_| Permutation::random(n, rng))
            .collect();

        let mut stats = EvolutionStats::new();
        let mut fitness_history: Vec<f64> = Vec::new();
        let mut evaluations = 0usize;
        let mut generation = 0usize;
        let mut best: Option<(Permutation, f64)> = None;

        loop {
            let gen_start = Instant::now();

            let inverted: Vec<Permutation>;
            let phenotypes: &[Permutation] = if self.evaluates_inverse() {
                inverted = population.iter().map(Permutation::inverse).collect();
                &inverted
            } else {
                &population
            };
            let fitness = self.evaluate(phenotypes)?;
            evaluations += phenotypes.len();
            let evaluation_time = gen_start.elapsed();

            for (phenotype, &value) in phenotypes.iter().zip(&fitness) {
                let improves = match &best {
                    Some((_, current)) => direction.is_better(value, *current),
                    None => !value.is_nan(),
                };
                if improves {
                    best = Some((phenotype.clone(), value));
                }
            }
            let best_so_far = best
                .as_ref()
                .map_or(direction.worst_value(), |(_, value)| *value);
            fitness_history.push(best_so_far);

            let mut gen_stats =
                GenerationStats::from_fitness(&fitness, direction, generation, evaluations)
                    .with_best_so_far(best_so_far);

            let state = EvolutionState {
                generation,
                evaluations,
                best_fitness: best_so_far,
                direction,
                fitness_history: &fitness_history,
            };
            if self.termination.should_terminate(&state) {
                gen_stats = gen_stats.with_timing(
                    TimingStats::new()
                        .with_evaluation(evaluation_time)
                        .with_total(gen_start.elapsed()),
                );
                stats.record(gen_stats);
                stats.set_termination_reason(self.termination.reason());
                log::info!(
                    "UMDA terminated after {} generations: {} (best = {})",
                    generation,
                    self.termination.reason(),
                    best_so_far
                );
                break;
            }

            let learn_start = Instant::now();
            let elites: Vec<&Permutation> = selection
                .select(&fitness, direction)
                .into_iter()
                .map(|i| &population[i])
                .collect();
            self.learn(&mut model, &elites)?;
            let learning_time = learn_start.elapsed();

            let sample_start = Instant::now();
            population = self.sample_population(&model, rng)?;
            let sampling_time = sample_start.elapsed();

            gen_stats = gen_stats.with_timing(
                TimingStats::new()
                    .with_evaluation(evaluation_time)
                    .with_learning(learning_time)
                    .with_sampling(sampling_time)
                    .with_total(gen_start.elapsed()),
            );
            log::trace!(
                "Generation {}: best = {}, mean = {}, best so far = {}",
                generation,
                gen_stats.best_fitness,
                gen_stats.mean_fitness,
                best_so_far
            );
            stats.record(gen_stats);
            generation += 1;
        }

        stats.set_runtime(start_time.elapsed());

        let (best_genome, best_fitness) = best.ok_or_else(|| {
            EvolutionError::FitnessEvaluation(
                "objective produced no comparable fitness value".to_string(),
            )
        })?;

        Ok(
            EvolutionResult::new(best_genome, best_fitness, generation, evaluations)
                .with_stats(stats),
        )
    }
}
