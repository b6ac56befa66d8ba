//! Error types for the tabmeta library.

use std::path::PathBuf;
use thiserror::Error;

/// Structural errors that abort a load run.
///
/// Data-level problems (bad cells, broken references, cardinality mismatches)
/// are never raised as errors; they are recorded on the
/// [`Report`](crate::report::Report) and processing continues.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Error reading or accessing an input file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error in '{file}': {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Header row does not match the versioned column list.
    #[error("{file}: invalid header: expected [{expected}], found [{found}]")]
    Header {
        file: String,
        expected: String,
        found: String,
    },
}

/// Result type alias for tabmeta operations.
pub type Result<T> = std::result::Result<T, MetadataError>;
