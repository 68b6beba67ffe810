//! Error types for the IdeaScale client
//!
//! Distinguishes:
//! - Transport failures (retried, then surfaced)
//! - Non-200 application responses (never retried, fatal for the run)
//! - Body decoding failures
//! - Configuration problems

/// IdeaScale API error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Server answered with something other than 200
    #[error("remote request failed with status {status}: {url}")]
    RemoteRequestFailed {
        /// HTTP status code
        status: u16,
        /// Full request URL
        url: String,
    },

    /// Request never produced a response within the retry budget
    #[error("transport error after {attempts} attempt(s) for {url}: {source}")]
    Transport {
        /// Full request URL
        url: String,
        /// Attempts made, including the first
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the expected JSON shape
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Full request URL
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client could not be built
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection limiter was closed while waiting for a slot
    #[error("connection limiter closed")]
    LimiterClosed,
}

impl ApiError {
    /// Check if a caller may retry the whole operation
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::RemoteRequestFailed { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// HTTP status, if the server answered at all
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
