//! Error types for the reporting pipelines
//!
//! Every variant is fatal for the run: no partial report is written. Data
//! quality problems (unmatched titles, unknown proposals) are not errors;
//! they are logged and the affected row is skipped or left blank.

use catalyst_datasets::DatasetError;
use catalyst_ideascale::ApiError;
use std::path::PathBuf;

/// Pipeline error
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Remote call failed
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Input file could not be loaded
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Group listing did not contain any group document
    #[error("campaign group {0} returned no campaigns")]
    EmptyCampaignGroup(i64),

    /// Report could not be written
    #[error("failed to write report {path}: {source}")]
    ReportWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Create report write error for path
    pub fn report_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReportWrite {
            path: path.into(),
            source,
        }
    }

    /// Check if re-running the pipeline may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_retryable())
    }
}

/// Result alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
