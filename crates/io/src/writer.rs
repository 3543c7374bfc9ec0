//! CSV prediction-table writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::IoError;
use crate::table::PredictionTable;

/// Column names written on the first line of every prediction table.
pub const HEADER: [&str; 3] = ["Time", "TrueValue", "Prediction"];

/// Largest number of decimals accepted by [`WriterConfig::with_precision`].
const MAX_PRECISION: usize = 17;

/// Configuration for writing prediction tables.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Number of decimals written for every value.
    precision: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

impl WriterConfig {
    /// Sets the number of decimals written for every value.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Returns the number of decimals written for every value.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Validates this configuration.
    ///
    /// [`write_csv`] runs the same check, but calling it up front rejects a
    /// bad precision before any prediction work is done.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `precision` exceeds 17.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.precision > MAX_PRECISION {
            return Err(IoError::Validation {
                count: 1,
                details: format!("precision {} > {MAX_PRECISION}", self.precision),
            });
        }
        Ok(())
    }
}

/// Write a prediction table as comma-separated text.
///
/// The first line holds [`HEADER`]; each following line holds one row of the
/// table with every value printed to the configured precision. An existing
/// file is overwritten.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Io`] if the file cannot be created or written.
pub fn write_csv(
    path: &Path,
    table: &PredictionTable<'_>,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;

    let file = File::create(path).map_err(|e| IoError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_rows(&mut out, table, config.precision).map_err(|e| IoError::io(path, e))?;
    out.flush().map_err(|e| IoError::io(path, e))?;

    debug!(path = %path.display(), rows = table.len(), "prediction table written");
    Ok(())
}

fn write_rows<W: Write>(
    out: &mut W,
    table: &PredictionTable<'_>,
    precision: usize,
) -> std::io::Result<()> {
    writeln!(out, "{}", HEADER.join(","))?;
    let rows = table
        .time()
        .iter()
        .zip(table.truth())
        .zip(table.prediction());
    for ((t, y), p) in rows {
        writeln!(out, "{t:.precision$},{y:.precision$},{p:.precision$}")?;
    }
    Ok(())
}
