//! Error types for dataset loading

use std::path::PathBuf;

/// Errors while reading an inbound file
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// File could not be opened or read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// CSV structure or a field value was invalid
    #[error("csv error in {path}: {source}")]
    Csv {
        /// File being parsed
        path: PathBuf,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// JSON document was invalid or had the wrong shape
    #[error("json error in {path}: {source}")]
    Json {
        /// File being parsed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A required column is absent from the header row
    #[error("{path} has no '{column}' column")]
    MissingColumn {
        /// File being read
        path: PathBuf,
        /// Expected column name
        column: String,
    },
}

impl DatasetError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create CSV error for path
    pub fn csv_error(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Create missing column error for path
    pub fn missing_column(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            path: path.into(),
            column: column.into(),
        }
    }
}

/// Result alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
