//! Codec parameters
//!
//! The eight `sense × direction × representation` combinations each define a
//! distinct bijection between permutations and count vectors.

use serde::{Deserialize, Serialize};

/// Comparison used when counting entries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sense {
    /// Count entries greater than the pivot
    #[default]
    GreaterThan,
    /// Count entries less than the pivot
    LessThan,
}

impl Sense {
    /// Whether `other` is counted against `pivot`
    #[inline]
    pub fn holds(self, other: usize, pivot: usize) -> bool {
        match self {
            Sense::GreaterThan => other > pivot,
            Sense::LessThan => other < pivot,
        }
    }
}

/// Side of each position the counting looks at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Entries at `[0, i)`
    #[default]
    Left,
    /// Entries at `(i, n)`
    Right,
}

/// Whether the permutation is inverted before counting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation {
    /// Count on the permutation as given
    #[default]
    Direct,
    /// Count on the functional inverse `q[p[i]] = i`
    Inverse,
}

/// Full parameter set of a permutation codec
///
/// The default (greater-than, left, direct) matches the classical
/// left-inversion table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Comparison sense
    pub sense: Sense,
    /// Counting direction
    pub direction: Direction,
    /// Direct or inverse representation
    pub representation: Representation,
}

impl CodecConfig {
    /// Create a codec configuration
    pub fn new(sense: Sense, direction: Direction, representation: Representation) -> Self {
        Self {
            sense,
            direction,
            representation,
        }
    }

    /// Classical inversion vector: inverse representation, counting to the right
    pub fn inversion_vector(sense: Sense) -> Self {
        Self::new(sense, Direction::Right, Representation::Inverse)
    }

    /// Classical insertion vector: inverse representation, counting to the left
    pub fn insertion_vector(sense: Sense) -> Self {
        Self::new(sense, Direction::Left, Representation::Inverse)
    }

    /// All eight parameter combinations
    pub fn all() -> [CodecConfig; 8] {
        let mut configs = [CodecConfig::default(); 8];
        let mut k = 0;
        for sense in [Sense::GreaterThan, Sense::LessThan] {
            for direction in [Direction::Left, Direction::Right] {
                for representation in [Representation::Direct, Representation::Inverse] {
                    configs[k] = CodecConfig::new(sense, direction, representation);
                    k += 1;
                }
            }
        }
        configs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sense_holds() {
        assert!(Sense::GreaterThan.holds(3, 1));
        assert!(!Sense::GreaterThan.holds(1, 1));
        assert!(Sense::LessThan.holds(0, 1));
        assert!(!Sense::LessThan.holds(2, 1));
    }

    #[test]
    fn test_all_configs_distinct() {
        let all: HashSet<CodecConfig> = CodecConfig::all().into_iter().collect();
        assert_eq!(all.len(), 8);
    }

    #[test]
    fn test_named_families() {
        let inv = CodecConfig::inversion_vector(Sense::LessThan);
        assert_eq!(inv.direction, Direction::Right);
        assert_eq!(inv.representation, Representation::Inverse);

        let ins = CodecConfig::insertion_vector(Sense::GreaterThan);
        assert_eq!(ins.direction, Direction::Left);
        assert_eq!(ins.representation, Representation::Inverse);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = CodecConfig::new(Sense::LessThan, Direction::Right, Representation::Direct);
        let json = serde_json::to_string(&config).unwrap();
        let back: CodecConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
