//! # permu-umda
//!
//! A Univariate Marginal Distribution Algorithm for permutation problems.
//!
//! The library evolves permutations toward optima of a black-box objective by
//! learning a per-position value distribution from elite individuals and
//! resampling from it.
//!
//! ## Core Concepts
//!
//! - **Univariate Model**: one categorical distribution per position, learned
//!   by counting and sampled either independently or sequentially without
//!   reusing values
//! - **Permutation Codecs**: inversion/insertion vector bijections that turn
//!   permutations into vectors whose entries can be sampled independently
//! - **Objectives**: a batch evaluation interface with QAP, LOP and PFSP
//!   benchmarks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use permu_umda::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let result = PermutationUMDA::builder()
//!     .population_size(40)
//!     .model_space(ModelSpace::Vector(CodecConfig::default()))
//!     .objective(load_problem("tai12a.dat")?)
//!     .max_generations(100)
//!     .build()?
//!     .run(&mut rng)?;
//! ```

pub mod algorithms;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod termination;
pub mod transform;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::termination::prelude::*;
    pub use crate::transform::prelude::*;
}
