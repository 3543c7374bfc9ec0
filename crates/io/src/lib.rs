//! # foresight-io
//!
//! Read single-channel recordings from delimited text files and write
//! prediction tables back out. Bridges on-disk CSV into the `&[f64]`
//! slice-based APIs of `foresight-apa`.

mod error;
mod reader;
mod recording;
mod table;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::{ReaderConfig, read_csv};
pub use recording::Recording;
pub use table::PredictionTable;
pub use writer::{HEADER, WriterConfig, write_csv};
