//! # foresight-apa
//!
//! Recursive time-series prediction with the Variable Step-Size Affine
//! Projection Algorithm (VSS-APA).
//!
//! Each stream position `k` builds an `M × P` block of sliding regressor
//! windows, solves the regularized normal equations to project the error onto
//! the block, updates the filter weights, and lets a feedback controller
//! adapt the step size from the smoothed error energy.
//!
//! ## Architecture
//!
//! ```text
//! RecursiveEstimator::run()
//!   ├─ validate config + streams     (config.rs, estimator.rs)
//!   └─ for each position k:
//!        ├─ BlockBuilder::build()     (block.rs)
//!        ├─ GramSolver::gram_inverse() (solver.rs)
//!        ├─ apply_update()            (update.rs)
//!        ├─ StepSizeController        (step_size.rs)
//!        └─ commit FilterState, record PredictionTrace
//! ```
//!
//! ## Quick start
//!
//! ```
//! use foresight_apa::{ApaConfig, RecursiveEstimator};
//!
//! let x: Vec<f64> = (0..500).map(|i| (i as f64 * 0.2).sin()).collect();
//! let config = ApaConfig::new(4, 2).with_horizon(1);
//! let mut estimator = RecursiveEstimator::new(config).unwrap();
//! let trace = estimator.run(&x, &x).unwrap();
//!
//! // Iteration i predicts x[trace.first_target() + i].
//! assert_eq!(trace.predictions().len(), trace.len());
//! ```
//!
//! ## Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | M | [`ApaConfig::filter_order()`] | Weight vector and window length |
//! | P | [`ApaConfig::projection_order()`] | Windows (constraints) per update |
//! | δ | [`ApaConfig::regularization()`] | Gram-matrix diagonal loading |
//! | μ | [`FilterState::step_size()`] | Adaptive step size |
//! | η | [`ApaConfig::target_energy()`] | Error energy the controller aims for |

mod block;
mod config;
mod error;
mod estimator;
mod solver;
mod step_size;
mod trace;
mod update;

pub use block::{Block, BlockBuilder};
pub use config::ApaConfig;
pub use error::ApaError;
pub use estimator::{FilterState, IterationResult, RecursiveEstimator};
pub use solver::{GramSolver, invert};
pub use step_size::StepSizeController;
pub use trace::PredictionTrace;
pub use update::{UpdateOutcome, apply_update};
