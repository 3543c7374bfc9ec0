//! Per-iteration history produced by a full estimator run.

use std::ops::Range;

use ndarray::{Array2, ArrayView1};

use crate::estimator::IterationResult;

/// History of one stream: one entry per iteration.
///
/// Iteration `i` predicts the target sample `d[first_target + i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionTrace {
    first_target: usize,
    predictions: Vec<f64>,
    weights: Array2<f64>,
    step_sizes: Vec<f64>,
    errors: Array2<f64>,
}

impl PredictionTrace {
    /// Allocates a trace for `n_iterations` entries of an `(M, P)` filter.
    pub(crate) fn with_capacity(
        n_iterations: usize,
        filter_order: usize,
        projection_order: usize,
        first_target: usize,
    ) -> Self {
        Self {
            first_target,
            predictions: Vec::with_capacity(n_iterations),
            weights: Array2::zeros((n_iterations, filter_order)),
            step_sizes: Vec::with_capacity(n_iterations),
            errors: Array2::zeros((n_iterations, projection_order)),
        }
    }

    /// Stores the result of the next iteration.
    pub(crate) fn record(&mut self, result: &IterationResult) {
        let i = self.predictions.len();
        self.predictions.push(result.prediction());
        self.step_sizes.push(result.step_size());
        self.weights.row_mut(i).assign(result.weights());
        self.errors.row_mut(i).assign(result.errors());
    }

    /// Returns the number of iterations recorded.
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    /// Returns `true` if no iterations were recorded.
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Returns the index into `d` of the sample predicted by iteration 0.
    pub fn first_target(&self) -> usize {
        self.first_target
    }

    /// Returns the range of target indices covered by the predictions.
    pub fn target_range(&self) -> Range<usize> {
        self.first_target..self.first_target + self.len()
    }

    /// Returns the prediction of each iteration.
    pub fn predictions(&self) -> &[f64] {
        &self.predictions
    }

    /// Returns the updated weight vector of each iteration (`n × M`).
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Returns the updated step size of each iteration.
    pub fn step_sizes(&self) -> &[f64] {
        &self.step_sizes
    }

    /// Returns the error vector of each iteration (`n × P`).
    pub fn errors(&self) -> &Array2<f64> {
        &self.errors
    }

    /// Returns the weights after the last iteration, if any.
    pub fn final_weights(&self) -> Option<ArrayView1<'_, f64>> {
        self.len().checked_sub(1).map(|i| self.weights.row(i))
    }
}
