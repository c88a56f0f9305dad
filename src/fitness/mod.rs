//! Objectives
//!
//! This module provides the objective interface, benchmark problems and
//! instance loaders.

pub mod benchmarks;
pub mod instances;
pub mod traits;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::instances::*;
    pub use super::traits::*;
}
