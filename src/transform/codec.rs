//! Permutation <-> count vector codec
//!
//! `encode` maps a permutation to a vector whose entry `i` counts how many
//! entries on one side of `i` compare in a given sense against `p[i]`.
//! Entries of such vectors are independent of each other in the sense that
//! every combination inside the per-position ranges is reachable, which is
//! what lets a univariate model learn on them. `decode` is the exact left
//! inverse under the same parameters.
//!
//! Both run in `O(n²)` time with `O(n)` extra memory.

use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::transform::config::{CodecConfig, Direction, Representation, Sense};

/// Check that `values` is a permutation of `0..values.len()`
pub fn is_permutation(values: &[usize]) -> bool {
    let n = values.len();
    let mut seen = vec![false; n];
    for &v in values {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Functional inverse `q` of `p`, with `q[p[i]] = i`
///
/// # Panics
/// Panics if `p` contains a value `>= p.len()`.
pub fn inverse(p: &[usize]) -> Vec<usize> {
    let mut q = vec![0; p.len()];
    for (i, &v) in p.iter().enumerate() {
        q[v] = i;
    }
    q
}

/// Encode a permutation into its count vector
pub fn encode(permutation: &[usize], config: &CodecConfig) -> Result<Vec<usize>, TransformError> {
    if !is_permutation(permutation) {
        return Err(TransformError::NotAPermutation(permutation.len()));
    }

    let inverted;
    let p: &[usize] = match config.representation {
        Representation::Direct => permutation,
        Representation::Inverse => {
            inverted = inverse(permutation);
            &inverted
        }
    };

    let vector = (0..p.len())
        .map(|i| {
            let side = match config.direction {
                Direction::Left => &p[..i],
                Direction::Right => &p[i + 1..],
            };
            side.iter()
                .filter(|&&other| config.sense.holds(other, p[i]))
                .count()
        })
        .collect();

    Ok(vector)
}

/// Decode a count vector back into the permutation it encodes
pub fn decode(vector: &[usize], config: &CodecConfig) -> Result<Vec<usize>, TransformError> {
    let n = vector.len();

    // Candidates ordered so that the e-th available one has exactly e
    // available candidates before it in the counting sense.
    let candidates: Vec<usize> = match config.sense {
        Sense::GreaterThan => (0..n).rev().collect(),
        Sense::LessThan => (0..n).collect(),
    };
    let positions: Vec<usize> = match config.direction {
        Direction::Left => (0..n).rev().collect(),
        Direction::Right => (0..n).collect(),
    };

    let mut available = vec![true; n];
    let mut remaining = n;
    let mut permutation = vec![0; n];

    for position in positions {
        let value = vector[position];
        let slot = nth_available(&available, value).ok_or(TransformError::EntryOutOfRange {
            position,
            value,
            limit: remaining,
        })?;
        permutation[position] = candidates[slot];
        available[slot] = false;
        remaining -= 1;
    }

    match config.representation {
        Representation::Direct => Ok(permutation),
        Representation::Inverse => Ok(inverse(&permutation)),
    }
}

fn nth_available(available: &[bool], nth: usize) -> Option<usize> {
    available
        .iter()
        .enumerate()
        .filter(|&(_, &free)| free)
        .nth(nth)
        .map(|(slot, _)| slot)
}

/// A codec bound to one parameter combination
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationCodec {
    config: CodecConfig,
}

impl PermutationCodec {
    /// Create a codec with the given parameters
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// The codec's parameters
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode one permutation
    pub fn encode(&self, permutation: &[usize]) -> Result<Vec<usize>, TransformError> {
        encode(permutation, &self.config)
    }

    /// Decode one vector
    pub fn decode(&self, vector: &[usize]) -> Result<Vec<usize>, TransformError> {
        decode(vector, &self.config)
    }

    /// Encode a batch of permutations
    pub fn encode_all<P: AsRef<[usize]>>(
        &self,
        permutations: &[P],
    ) -> Result<Vec<Vec<usize>>, TransformError> {
        permutations.iter().map(|p| self.encode(p.as_ref())).collect()
    }
}
