//! Error handling for the CBR engine.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for the CBR engine and its ingestion layer
#[derive(Debug, thiserror::Error)]
pub enum CbrError {
    /// Invalid weight table or engine configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A stored case does not satisfy the normalized case schema
    #[error("Schema violation in case '{case_id}': {reason}")]
    SchemaViolation {
        /// Identifier of the offending case (or its row position when the id is missing)
        case_id: String,
        /// What is wrong with it
        reason: String,
    },

    /// No case with the requested id exists in the store
    #[error("Case not found: {0}")]
    NotFound(String),

    /// Error opening or reading a file
    #[error("IO error for {path}: {source}")]
    Io {
        /// The path being accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error converting Arrow record batches into records
    #[error("Record conversion error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),
}

impl CbrError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a schema violation for a case
    pub fn schema_violation(case_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            case_id: case_id.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for CBR operations
pub type Result<T> = std::result::Result<T, CbrError>;
