//! Affine-projection weight update.

use ndarray::{Array1, Array2};

use crate::block::Block;

/// Output of one weight update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// `Xᵀw` computed from the weights before the update (length `P`).
    predictions: Array1<f64>,
    /// `targets - predictions` (length `P`).
    errors: Array1<f64>,
    /// Updated weight vector (length `M`).
    weights: Array1<f64>,
}

impl UpdateOutcome {
    /// Returns the prediction for the current position (first output entry).
    pub fn prediction(&self) -> f64 {
        self.predictions[0]
    }

    /// Returns the full `P`-length output vector.
    pub fn predictions(&self) -> &Array1<f64> {
        &self.predictions
    }

    /// Returns the `P`-length error vector.
    pub fn errors(&self) -> &Array1<f64> {
        &self.errors
    }

    /// Returns the updated weight vector.
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Consumes the outcome, returning `(errors, weights)`.
    pub fn into_parts(self) -> (Array1<f64>, Array1<f64>) {
        (self.errors, self.weights)
    }
}

/// Computes prediction, error and the updated weights for one block.
///
/// `inverse` is `(XᵀX + δI)⁻¹` for the block. The update is
/// `w' = w + μ·X·inverse·(d - Xᵀw)`. `weights` is only read; the new vector
/// is returned in a fresh buffer so the prediction and error always come from
/// the pre-update weights.
pub fn apply_update(
    weights: &Array1<f64>,
    block: &Block,
    inverse: &Array2<f64>,
    step_size: f64,
) -> UpdateOutcome {
    let x = block.regressors();
    let predictions = x.t().dot(weights);
    let errors = block.targets() - &predictions;
    let projected = inverse.dot(&errors);
    let direction = x.dot(&projected);

    let mut updated = weights.clone();
    updated.scaled_add(step_size, &direction);

    UpdateOutcome {
        predictions,
        errors,
        weights: updated,
    }
}
