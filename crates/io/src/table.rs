//! Borrowed view over a prediction table.

use crate::error::IoError;
use crate::recording::Recording;
use crate::validate;

/// Borrowed view over the rows of a prediction table.
///
/// Row `i` pairs `time[i]`, the observed value `truth[i]` and the value
/// `prediction[i]` that the filter produced for it. All slices have the same
/// length. This struct does not own its data.
#[derive(Debug, Clone, Copy)]
pub struct PredictionTable<'a> {
    /// Time stamp of each predicted sample.
    time: &'a [f64],
    /// Observed value of each predicted sample.
    truth: &'a [f64],
    /// Filter prediction of each sample.
    prediction: &'a [f64],
}

impl<'a> PredictionTable<'a> {
    /// Creates a new `PredictionTable` view after validating that all slices
    /// share the same length as `time`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if any slice length differs from
    /// `time.len()`.
    pub fn new(
        time: &'a [f64],
        truth: &'a [f64],
        prediction: &'a [f64],
    ) -> Result<Self, IoError> {
        validate::validate_lengths(
            ("time", time.len()),
            &[("truth", truth.len()), ("prediction", prediction.len())],
        )
        .finish()?;

        Ok(Self {
            time,
            truth,
            prediction,
        })
    }

    /// Builds a view that aligns `predictions` with the samples they target.
    ///
    /// Prediction `i` is paired with sample `first_target + i` of the
    /// recording.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the predictions run past the end of
    /// the recording.
    pub fn aligned(
        recording: &'a Recording,
        predictions: &'a [f64],
        first_target: usize,
    ) -> Result<Self, IoError> {
        let end = first_target + predictions.len();
        if end > recording.len() {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "{} predictions starting at sample {first_target} exceed recording length {}",
                    predictions.len(),
                    recording.len()
                ),
            });
        }
        Self::new(
            &recording.time()[first_target..end],
            &recording.values()[first_target..end],
            predictions,
        )
    }

    /// Returns the time stamps.
    pub fn time(&self) -> &'a [f64] {
        self.time
    }

    /// Returns the observed values.
    pub fn truth(&self) -> &'a [f64] {
        self.truth
    }

    /// Returns the predictions.
    pub fn prediction(&self) -> &'a [f64] {
        self.prediction
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
