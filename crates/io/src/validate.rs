//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus standalone helpers that check
//! common invariants on sample columns.

use crate::error::IoError;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Move every error of `other` into this collector.
    pub(crate) fn merge(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Column checks
// ---------------------------------------------------------------------------

/// Check that every named column has the same length as the reference column.
pub(crate) fn validate_lengths(
    reference: (&str, usize),
    columns: &[(&str, usize)],
) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let (ref_name, ref_len) = reference;
    for &(name, len) in columns {
        if len != ref_len {
            c.push(format!("{name} length {len} != {ref_name} length {ref_len}"));
        }
    }
    c
}

/// Check that a column contains only finite values.
///
/// Reports the count and the first offending index.
pub(crate) fn validate_finite(name: &str, values: &[f64]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let mut bad = values.iter().enumerate().filter(|(_, v)| !v.is_finite());
    if let Some((first, _)) = bad.next() {
        let count = 1 + bad.count();
        c.push(format!(
            "{name} has {count} non-finite value(s), first at index {first}"
        ));
    }
    c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
