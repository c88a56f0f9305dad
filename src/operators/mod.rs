//! Genetic operators
//!
//! This module provides the selection operator used by the UMDA driver.

pub mod selection;

pub mod prelude {
    pub use super::selection::*;
}
