//! Evaluation error types.

/// Errors that can occur during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    /// One or more validation checks failed.
    #[error("{count} validation error(s): {details}")]
    Validation { count: usize, details: String },

    /// The reference segment has zero energy, so no ratio can be formed.
    #[error("reference segment of {len} samples has zero norm")]
    ZeroReference { len: usize },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = EvaluateError::Validation {
            count: 2,
            details: "truth length 3 != predictions length 4".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("2 validation error(s)"));
        assert!(msg.contains("truth length 3"));
    }

    #[test]
    fn test_zero_reference_display() {
        let err = EvaluateError::ZeroReference { len: 12 };
        assert_eq!(err.to_string(), "reference segment of 12 samples has zero norm");
    }

    #[test]
    fn test_serialization_display() {
        let err = EvaluateError::Serialization {
            reason: "invalid JSON".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("serialization error"));
        assert!(msg.contains("invalid JSON"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<EvaluateError>();
    }
}
