//! Foresight evaluation: score a prediction trace against the signal it was
//! predicting.

mod config;
mod error;
mod metrics;
mod output;

use foresight_apa::PredictionTrace;
use tracing::debug;

pub use config::EvaluateConfig;
pub use error::EvaluateError;
pub use metrics::{normalized_error, segment_mse};
pub use output::{StreamSummary, to_json};

/// Summarise how well a filter run tracked its desired signal.
///
/// `d` is the full desired signal the trace was produced from. The reference
/// for the normalized error is the stretch of `d` that the iterations
/// targeted, `d[trace.target_range()]`.
///
/// A run shorter than the configured segment count is split into one segment
/// per iteration. A silent reference has no normalized error and reports
/// `None` instead of failing.
///
/// # Errors
///
/// Returns [`EvaluateError::Validation`] if the configuration is invalid or
/// the trace targets samples past the end of `d`.
#[tracing::instrument(skip(trace, d, config), fields(n_iterations = trace.len()))]
pub fn summarize(
    file: &str,
    trace: &PredictionTrace,
    d: &[f64],
    config: &EvaluateConfig,
) -> Result<StreamSummary, EvaluateError> {
    config.validate()?;

    let range = trace.target_range();
    let Some(truth) = d.get(range.clone()) else {
        return Err(EvaluateError::Validation {
            count: 1,
            details: format!(
                "trace targets samples {}..{} but the signal has {} samples",
                range.start,
                range.end,
                d.len()
            ),
        });
    };

    let normalized = match normalized_error(trace.errors().view(), truth) {
        Ok(value) => Some(value),
        Err(EvaluateError::ZeroReference { len }) => {
            debug!(len, "reference is silent, no normalized error");
            None
        }
        Err(e) => return Err(e),
    };

    let segments = config.segments().min(trace.len());
    let mse = if segments == 0 {
        Vec::new()
    } else {
        segment_mse(trace.predictions(), truth, segments)?
    };

    let step_sizes = trace.step_sizes();
    let final_step_size = step_sizes.last().copied().unwrap_or(f64::NAN);
    let mean_step_size = step_sizes.iter().sum::<f64>() / step_sizes.len() as f64;

    debug!(?normalized, segments, "stream summarised");

    Ok(StreamSummary {
        file: file.to_string(),
        n_samples: d.len(),
        n_iterations: trace.len(),
        first_target: trace.first_target(),
        normalized_error: normalized,
        final_step_size,
        mean_step_size,
        segments,
        mse_first_segment: mse.first().copied(),
        mse_last_segment: mse.last().copied(),
    })
}
