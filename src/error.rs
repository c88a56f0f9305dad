//! Error types for permu-umda
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for genome operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Invalid genome structure
    #[error("Invalid genome structure: {0}")]
    InvalidStructure(String),

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Error type for permutation <-> vector transformations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The input to `encode` is not a permutation of `0..n`
    #[error("Input of length {0} is not a permutation of 0..n")]
    NotAPermutation(usize),

    /// A vector entry selects a candidate that does not exist
    #[error("Entry {value} at position {position} is out of range (must be < {limit})")]
    EntryOutOfRange {
        position: usize,
        value: usize,
        limit: usize,
    },
}

/// Error type for the univariate distribution model
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Sampling was requested before any call to `learn`
    #[error("Model has not been learned yet; call learn before sampling")]
    NotLearned,

    /// `learn` received no individuals
    #[error("Cannot learn from an empty population")]
    EmptyPopulation,

    /// An individual's length differs from the first one
    #[error("Individual {index} has length {actual}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// An entry lies outside `[0, n)`
    #[error("Individual {index} has value {value} at position {position}, outside [0, {dimension})")]
    ValueOutOfRange {
        index: usize,
        position: usize,
        value: usize,
        dimension: usize,
    },

    /// A distribution row has zero total mass
    #[error("Distribution row {0} has zero total mass")]
    DegenerateRow(usize),

    /// A stored distribution is not square
    #[error("Distribution row {row} has {actual} entries, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A stored distribution row is not a probability vector
    #[error("Distribution row {row} sums to {sum}, expected 1 with non-negative entries")]
    NotStochastic { row: usize, sum: f64 },

    /// The categorical sampler rejected a row
    #[error("Sampling failed: {0}")]
    Sampling(String),
}

/// Error type for problem instance loading
#[derive(Debug, Error)]
pub enum ProblemError {
    /// IO error while reading an instance
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed token in an instance
    #[error("Parse error: {0}")]
    Parse(String),

    /// Instance data has the wrong shape
    #[error("Shape error: {0}")]
    Shape(String),
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Transformation error
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Model error
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Problem loading error
    #[error("Problem error: {0}")]
    Problem(#[from] ProblemError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Objective returned a fitness vector of the wrong size
    #[error("Fitness evaluation failed: {0}")]
    FitnessEvaluation(String),
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
