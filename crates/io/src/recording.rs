//! Single-channel recording container.

use crate::error::IoError;
use crate::validate;

/// A sampled time series loaded from tabular storage.
///
/// Holds a time stamp and a sample value per row. Both columns have the same
/// length and contain only finite numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    /// Time stamp of each sample.
    time: Vec<f64>,
    /// Sample values.
    values: Vec<f64>,
}

impl Recording {
    /// Creates a new `Recording` after validating inputs.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if any of the following checks fail:
    /// - `time` and `values` have different lengths
    /// - either column contains NaN or infinite values
    pub fn new(time: Vec<f64>, values: Vec<f64>) -> Result<Self, IoError> {
        let mut checks =
            validate::validate_lengths(("time", time.len()), &[("values", values.len())]);
        checks.merge(validate::validate_finite("time", &time));
        checks.merge(validate::validate_finite("values", &values));
        checks.finish()?;

        Ok(Self { time, values })
    }

    /// Returns the time stamps.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Returns the sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the recording holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
