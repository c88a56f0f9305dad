//! Genome types
//!
//! This module provides the permutation genome evolved by the UMDA driver.

pub mod permutation;

pub mod prelude {
    pub use super::permutation::*;
}
