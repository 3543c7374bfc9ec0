//! Error metrics over prediction traces.

use ndarray::ArrayView2;

use crate::error::EvaluateError;

/// Ratio of the Euclidean norm of every error entry to the norm of the
/// reference segment.
///
/// `errors` is the `n × P` a-priori error history; `reference` is the stretch
/// of the desired signal those iterations targeted.
///
/// # Errors
///
/// Returns [`EvaluateError::ZeroReference`] if the reference is empty or all
/// zeros.
pub fn normalized_error(
    errors: ArrayView2<'_, f64>,
    reference: &[f64],
) -> Result<f64, EvaluateError> {
    let reference_norm = reference.iter().map(|v| v * v).sum::<f64>().sqrt();
    if reference_norm == 0.0 {
        return Err(EvaluateError::ZeroReference {
            len: reference.len(),
        });
    }
    let error_norm = errors.iter().map(|e| e * e).sum::<f64>().sqrt();
    Ok(error_norm / reference_norm)
}

/// Mean squared prediction error over `segments` consecutive, near-equal
/// stretches of the trace.
///
/// Segment `s` covers indices `s * n / segments .. (s + 1) * n / segments`,
/// so lengths differ by at most one sample.
///
/// # Errors
///
/// Returns [`EvaluateError::Validation`] if the slices differ in length,
/// `segments` is zero, or there are fewer samples than segments.
pub fn segment_mse(
    predictions: &[f64],
    truth: &[f64],
    segments: usize,
) -> Result<Vec<f64>, EvaluateError> {
    let n = predictions.len();
    let mut problems = Vec::new();
    if truth.len() != n {
        problems.push(format!("truth length {} != predictions length {n}", truth.len()));
    }
    if segments == 0 {
        problems.push("segments must be at least 1".to_string());
    } else if n < segments {
        problems.push(format!("{n} samples cannot fill {segments} segments"));
    }
    if !problems.is_empty() {
        return Err(EvaluateError::Validation {
            count: problems.len(),
            details: problems.join("; "),
        });
    }

    let mse = (0..segments)
        .map(|s| {
            let start = s * n / segments;
            let end = (s + 1) * n / segments;
            let sum: f64 = predictions[start..end]
                .iter()
                .zip(&truth[start..end])
                .map(|(p, t)| (t - p).powi(2))
                .sum();
            sum / (end - start) as f64
        })
        .collect();
    Ok(mse)
}
