//! JSON output structures for evaluation results.

use crate::error::EvaluateError;
use serde::Serialize;

/// Convergence summary of one processed stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamSummary {
    /// Name of the input the stream came from.
    pub file: String,
    /// Number of samples in the desired signal.
    pub n_samples: usize,
    /// Number of filter iterations.
    pub n_iterations: usize,
    /// Index of the sample predicted by the first iteration.
    pub first_target: usize,
    /// Norm of the error history over the norm of the targeted samples.
    /// `None` when the targeted samples are all zero.
    pub normalized_error: Option<f64>,
    /// Step size after the last iteration.
    pub final_step_size: f64,
    /// Mean step size over all iterations.
    pub mean_step_size: f64,
    /// Number of segments the trace was split into for convergence MSE,
    /// never more than `n_iterations`.
    pub segments: usize,
    /// Prediction MSE over the first segment, `None` for an empty trace.
    pub mse_first_segment: Option<f64>,
    /// Prediction MSE over the last segment, `None` for an empty trace.
    pub mse_last_segment: Option<f64>,
}

/// Serialize stream summaries to a JSON string.
pub fn to_json(summaries: &[StreamSummary]) -> Result<String, EvaluateError> {
    serde_json::to_string_pretty(summaries).map_err(|e| EvaluateError::Serialization {
        reason: e.to_string(),
    })
}
