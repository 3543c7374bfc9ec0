//! Sliding regressor blocks extracted from the sample stream.

use ndarray::{Array1, Array2, ArrayView1};

use crate::config::ApaConfig;
use crate::error::ApaError;

/// Regressor matrix and target vector for one iteration.
///
/// Column `p` of the `M × P` regressor matrix is the `M`-sample window of
/// `x` ending at position `k - p`; entry `p` of the target vector is
/// `d[k + horizon - p]`. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    regressors: Array2<f64>,
    targets: Array1<f64>,
}

impl Block {
    /// Returns the `M × P` regressor matrix.
    pub fn regressors(&self) -> &Array2<f64> {
        &self.regressors
    }

    /// Returns the `P`-length target vector.
    pub fn targets(&self) -> &Array1<f64> {
        &self.targets
    }

    /// Returns the filter order `M` (number of rows).
    pub fn filter_order(&self) -> usize {
        self.regressors.nrows()
    }

    /// Returns the projection order `P` (number of columns).
    pub fn projection_order(&self) -> usize {
        self.regressors.ncols()
    }
}

/// Builds [`Block`]s for a fixed `(M, P, horizon)` geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockBuilder {
    filter_order: usize,
    projection_order: usize,
    horizon: usize,
}

impl BlockBuilder {
    /// Creates a builder for windows of length `filter_order`,
    /// `projection_order` columns and the given prediction horizon.
    pub fn new(filter_order: usize, projection_order: usize, horizon: usize) -> Self {
        Self {
            filter_order,
            projection_order,
            horizon,
        }
    }

    /// Creates a builder with the geometry of `config`.
    pub fn from_config(config: &ApaConfig) -> Self {
        Self::new(
            config.filter_order(),
            config.projection_order(),
            config.horizon(),
        )
    }

    /// Extracts the block for stream position `k`.
    ///
    /// # Errors
    ///
    /// Returns [`ApaError::IndexOutOfRange`] if any window would start before
    /// the beginning of `x`, end past its end, or any target would fall
    /// outside `d`.
    pub fn build(&self, x: &[f64], d: &[f64], k: usize) -> Result<Block, ApaError> {
        let m = self.filter_order;
        let n_cols = self.projection_order;
        let mut regressors = Array2::zeros((m, n_cols));
        let mut targets = Array1::zeros(n_cols);

        for p in 0..n_cols {
            let end = k as i64 - p as i64;
            let start = end - m as i64 + 1;
            check_index(start, x.len())?;
            check_index(end, x.len())?;
            let window = &x[start as usize..=end as usize];
            regressors.column_mut(p).assign(&ArrayView1::from(window));

            let target = (k + self.horizon) as i64 - p as i64;
            check_index(target, d.len())?;
            targets[p] = d[target as usize];
        }

        Ok(Block {
            regressors,
            targets,
        })
    }
}

fn check_index(index: i64, len: usize) -> Result<(), ApaError> {
    if index < 0 || index as usize >= len {
        return Err(ApaError::IndexOutOfRange { index, len });
    }
    Ok(())
}
