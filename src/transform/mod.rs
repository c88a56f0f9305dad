//! Permutation <-> vector transformations
//!
//! Bijective inversion/insertion style encodings that move permutations into a
//! coordinate system where a univariate model can learn them.

pub mod codec;
pub mod config;

pub use codec::{decode, encode, inverse, is_permutation, PermutationCodec};
pub use config::{CodecConfig, Direction, Representation, Sense};

pub mod prelude {
    pub use super::codec::*;
    pub use super::config::*;
}
