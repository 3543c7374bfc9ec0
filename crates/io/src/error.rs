//! Error types for foresight-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the foresight-io crate.
///
/// This enum covers missing files, operating-system I/O failures, recordings
/// without usable rows, and shape problems in the data handed to the writer.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an operating-system error raised while reading or writing a file.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a file contains no row that could be parsed.
    #[error("no usable rows in {}", path.display())]
    EmptyRecording {
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl IoError {
    /// Wraps a [`std::io::Error`] raised while accessing `path`.
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            return IoError::FileNotFound { path };
        }
        IoError::Io {
            path,
            reason: err.to_string(),
        }
    }
}
