//! Error types for the foresight-apa crate.

/// Error type for all fallible operations in the foresight-apa crate.
///
/// Configuration and input variants are detected before any iteration runs
/// and leave no partial state behind. [`ApaError::SingularMatrix`] and
/// [`ApaError::IndexOutOfRange`] are raised from inside a single iteration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApaError {
    /// Returned when the filter order `M` is zero.
    #[error("filter order must be at least 1, got {m}")]
    InvalidFilterOrder {
        /// Filter order provided.
        m: usize,
    },

    /// Returned when the projection order `P` is zero.
    #[error("projection order must be at least 1, got {p}")]
    InvalidProjectionOrder {
        /// Projection order provided.
        p: usize,
    },

    /// Returned when the regularization constant is not strictly positive.
    #[error("regularization constant must be positive and finite, got {delta}")]
    InvalidRegularization {
        /// Regularization constant provided.
        delta: f64,
    },

    /// Returned when the step-size bounds are non-finite, negative or inverted.
    #[error("invalid step-size bounds: [{min}, {max}]")]
    InvalidStepSizeBounds {
        /// Lower bound provided.
        min: f64,
        /// Upper bound provided.
        max: f64,
    },

    /// Returned when a scalar controller or solver parameter is out of range.
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Value provided.
        value: f64,
    },

    /// Returned when the prediction horizon is zero.
    #[error("prediction horizon must be at least 1, got {horizon}")]
    InvalidHorizon {
        /// Horizon provided.
        horizon: usize,
    },

    /// Returned when the regressor and target streams differ in length.
    #[error("stream length mismatch: x has {x} samples, d has {d}")]
    LengthMismatch {
        /// Length of the regressor stream.
        x: usize,
        /// Length of the target stream.
        d: usize,
    },

    /// Returned when a stream contains NaN or infinite samples.
    #[error("{input} stream contains non-finite values")]
    NonFiniteData {
        /// Which stream failed the check.
        input: &'static str,
    },

    /// Returned when the stream is too short to form a single iteration.
    #[error("insufficient data: got {n} samples, need at least {min}")]
    InsufficientData {
        /// Number of samples provided.
        n: usize,
        /// Minimum number of samples required.
        min: usize,
    },

    /// Returned when a matrix that must be square is not.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when a Gauss-Jordan pivot falls below the pivot tolerance.
    #[error("singular matrix: pivot {pivot:e} at row {row} is below tolerance")]
    SingularMatrix {
        /// Row at which elimination stopped.
        row: usize,
        /// Pivot value found at that row.
        pivot: f64,
    },

    /// Returned when block construction would read outside the stream.
    #[error("index out of range: position {index} in a stream of {len} samples")]
    IndexOutOfRange {
        /// Offending position (may be negative when a window starts before 0).
        index: i64,
        /// Stream length.
        len: usize,
    },
}
