//! # Probabilistic Life
//!
//! A stochastic variant of Conway's Game of Life on a toroidal board.
//!
//! Each cell looks at every neighbour within two cells, weighs the live ones
//! by distance, truncates the sum and turns it into a probability of being
//! alive next step. Randomness is always supplied by the caller, so a seeded
//! generator reproduces a run exactly.
//!
//! ```
//! use probabilistic_life::Engine;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha12Rng;
//!
//! let mut rng = ChaCha12Rng::seed_from_u64(7);
//! let mut engine = Engine::new(40, 15, &mut rng).unwrap();
//! engine.step(&mut rng);
//! assert_eq!(engine.render().lines().count(), 15);
//! ```

pub mod engine;
pub mod error;
pub mod grid;
pub mod rules;
pub mod stats;
pub mod trial;

pub use engine::{Engine, StepReport};
pub use error::{LifeError, Result};
pub use grid::Grid;
pub use stats::Stats;
pub use trial::{run_trial, run_trials, BatchSummary, TrialConfig, TrialOutcome};
