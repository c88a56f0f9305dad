//! Evolutionary algorithms
//!
//! This module provides the estimation of distribution algorithms.

pub mod eda;

pub mod prelude {
    pub use super::eda::*;
}
