//! Regularized Gram-matrix construction and Gauss-Jordan inversion.
//!
//! The projection order `P` is small (single digits) in practice, so a dense
//! `P × P` elimination without row exchanges is sufficient. A regularized
//! Gram matrix is symmetric positive definite, which keeps every pivot
//! positive; the tolerance check only trips on degenerate input with
//! (near-)zero regularization.

use ndarray::{Array2, s};

use crate::block::Block;
use crate::config::ApaConfig;
use crate::error::ApaError;

/// Forms `XᵀX + δI` for a regressor block and inverts it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GramSolver {
    regularization: f64,
    pivot_tolerance: f64,
}

impl GramSolver {
    /// Creates a solver with regularization `delta` and the given pivot
    /// tolerance.
    ///
    /// No validation happens here: a zero `delta` is accepted so that the
    /// unregularized system can be inspected directly.
    pub fn new(regularization: f64, pivot_tolerance: f64) -> Self {
        Self {
            regularization,
            pivot_tolerance,
        }
    }

    /// Creates a solver from the regularization and pivot tolerance of `config`.
    pub fn from_config(config: &ApaConfig) -> Self {
        Self::new(config.regularization(), config.pivot_tolerance())
    }

    /// Returns the regularization constant.
    pub fn regularization(&self) -> f64 {
        self.regularization
    }

    /// Returns the pivot tolerance.
    pub fn pivot_tolerance(&self) -> f64 {
        self.pivot_tolerance
    }

    /// Computes the regularized `P × P` Gram matrix `XᵀX + δI`.
    pub fn gram(&self, regressors: &Array2<f64>) -> Array2<f64> {
        let mut gram = regressors.t().dot(regressors);
        gram.diag_mut().mapv_inplace(|v| v + self.regularization);
        gram
    }

    /// Returns the inverse of the regularized Gram matrix of `block`.
    ///
    /// # Errors
    ///
    /// Returns [`ApaError::SingularMatrix`] if elimination meets a pivot whose
    /// magnitude is below the pivot tolerance.
    pub fn gram_inverse(&self, block: &Block) -> Result<Array2<f64>, ApaError> {
        invert(&self.gram(block.regressors()), self.pivot_tolerance)
    }
}

/// Inverts a square matrix by Gauss-Jordan elimination on `[A | I]`.
///
/// Each pivot row is scaled to a unit pivot and eliminated from every other
/// row. Rows are never exchanged, so a zero on the diagonal fails even when
/// the matrix is invertible.
///
/// # Errors
///
/// Returns [`ApaError::NotSquare`] if `a` is not square, or
/// [`ApaError::SingularMatrix`] if a pivot is NaN or its magnitude is below
/// `tolerance`.
pub fn invert(a: &Array2<f64>, tolerance: f64) -> Result<Array2<f64>, ApaError> {
    let (n, cols) = a.dim();
    if n != cols {
        return Err(ApaError::NotSquare { rows: n, cols });
    }

    let mut aug = Array2::zeros((n, 2 * n));
    aug.slice_mut(s![.., ..n]).assign(a);
    for i in 0..n {
        aug[[i, n + i]] = 1.0;
    }

    for i in 0..n {
        let pivot = aug[[i, i]];
        if pivot.is_nan() || pivot.abs() < tolerance {
            return Err(ApaError::SingularMatrix { row: i, pivot });
        }
        aug.row_mut(i).mapv_inplace(|v| v / pivot);

        let pivot_row = aug.row(i).to_owned();
        for r in 0..n {
            if r == i {
                continue;
            }
            let factor = aug[[r, i]];
            if factor != 0.0 {
                aug.row_mut(r).scaled_add(-factor, &pivot_row);
            }
        }
    }

    Ok(aug.slice(s![.., n..]).to_owned())
}
