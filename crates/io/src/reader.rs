//! CSV recording reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::IoError;
use crate::recording::Recording;

/// Configuration for reading a recording from a delimited text file.
///
/// The [`Default`] implementation reads a comma-separated file with a header
/// line, time stamps in column 0 and sample values in column 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderConfig {
    /// Zero-based column holding the time stamp.
    time_column: usize,
    /// Zero-based column holding the sample value.
    value_column: usize,
    /// Whether the first line is a header to be skipped.
    has_header: bool,
    /// Field delimiter.
    delimiter: char,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            time_column: 0,
            value_column: 1,
            has_header: true,
            delimiter: ',',
        }
    }
}

impl ReaderConfig {
    /// Set the time stamp column.
    pub fn with_time_column(mut self, column: usize) -> Self {
        self.time_column = column;
        self
    }

    /// Set the sample value column.
    pub fn with_value_column(mut self, column: usize) -> Self {
        self.value_column = column;
        self
    }

    /// Declare whether the first line is a header.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the time stamp column.
    pub fn time_column(&self) -> usize {
        self.time_column
    }

    /// Returns the sample value column.
    pub fn value_column(&self) -> usize {
        self.value_column
    }

    /// Returns whether the first line is a header.
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Returns the field delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the time and value columns coincide
    /// or the delimiter is whitespace or a character that can appear in a
    /// number.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.time_column == self.value_column {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "time_column and value_column must differ, both are {}",
                    self.value_column
                ),
            });
        }
        let d = self.delimiter;
        if d.is_whitespace() || d.is_ascii_digit() || matches!(d, '.' | '-' | '+' | 'e' | 'E') {
            return Err(IoError::Validation {
                count: 1,
                details: format!("unusable delimiter {d:?}"),
            });
        }
        Ok(())
    }

    /// Parse one data line into `(time, value)`.
    ///
    /// Returns `None` when either column is missing, not a number, or not
    /// finite.
    fn parse_row(&self, line: &str) -> Option<(f64, f64)> {
        let mut time = None;
        let mut value = None;
        let last = self.time_column.max(self.value_column);
        for (i, field) in line.split(self.delimiter).enumerate().take(last + 1) {
            if i == self.time_column {
                time = field.trim().parse::<f64>().ok();
            } else if i == self.value_column {
                value = field.trim().parse::<f64>().ok();
            }
        }
        match (time, value) {
            (Some(t), Some(v)) if t.is_finite() && v.is_finite() => Some((t, v)),
            _ => None,
        }
    }
}

/// Read a single-channel recording from a delimited text file.
///
/// Blank lines are ignored. Data lines whose time or value field is missing
/// or does not parse to a finite number are skipped and logged at debug
/// level.
///
/// # Errors
///
/// Returns [`IoError::Validation`] for an invalid configuration,
/// [`IoError::FileNotFound`] or [`IoError::Io`] when the file cannot be read,
/// and [`IoError::EmptyRecording`] when no line yields a sample.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_csv(path: &Path, config: &ReaderConfig) -> Result<Recording, IoError> {
    config.validate()?;

    let file = File::open(path).map_err(|e| IoError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut time = Vec::new();
    let mut values = Vec::new();
    let mut skipped = 0usize;
    let mut header_pending = config.has_header;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| IoError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        if header_pending {
            header_pending = false;
            continue;
        }
        match config.parse_row(&line) {
            Some((t, v)) => {
                time.push(t);
                values.push(v);
            }
            None => {
                skipped += 1;
                debug!(line = line_no + 1, "skipping unparseable row");
            }
        }
    }

    if values.is_empty() {
        return Err(IoError::EmptyRecording {
            path: path.to_path_buf(),
        });
    }

    info!(samples = values.len(), skipped, "recording loaded");
    Recording::new(time, values)
}
