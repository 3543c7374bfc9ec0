//! Evaluation configuration.

use crate::error::EvaluateError;

/// Configuration for summarising a prediction trace.
#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    segments: usize,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self { segments: 3 }
    }
}

impl EvaluateConfig {
    /// Set the number of equal-length segments used for convergence MSE.
    ///
    /// The summary reports the first and last segment.
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// Returns the number of convergence segments.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Validate this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Validation`] if `segments` is zero.
    pub fn validate(&self) -> Result<(), EvaluateError> {
        if self.segments == 0 {
            return Err(EvaluateError::Validation {
                count: 1,
                details: "segments must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
