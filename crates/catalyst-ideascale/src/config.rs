//! Client configuration
//!
//! Constructed once at startup and handed to [`IdeascaleClient::new`] by
//! reference. Nothing in this crate reads the environment on its own.
//!
//! [`IdeascaleClient::new`]: crate::IdeascaleClient::new

use crate::error::ApiError;
use std::time::Duration;

/// Default transport retry budget per request
pub const DEFAULT_MAX_RETRIES: u32 = 15;

/// Default page size for paginated endpoints
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Configuration for the IdeaScale API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://cardano.ideascale.com/a/rest`
    pub base_url: String,
    /// Static token sent in the `api_token` header
    pub api_token: String,
    /// Transport-level retries for a single request
    pub max_retries: u32,
    /// Maximum in-flight requests
    pub max_connections: usize,
    /// Maximum idle keepalive connections
    pub max_idle_connections: usize,
    /// Per-request timeout (`None` waits forever)
    pub request_timeout: Option<Duration>,
    /// Delay before the first retry, doubled on each further attempt
    pub retry_backoff: Duration,
    /// Upper bound for the retry delay
    pub max_retry_backoff: Duration,
    /// Items per page on paginated endpoints
    pub page_size: usize,
    /// Per-challenge fan-out used by the pipelines
    pub concurrency: usize,
}

impl ApiConfig {
    /// Create configuration with defaults for everything but the endpoint
    #[inline]
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            max_retries: DEFAULT_MAX_RETRIES,
            max_connections: 10,
            max_idle_connections: 5,
            request_timeout: None,
            retry_backoff: Duration::from_millis(500),
            max_retry_backoff: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: 1,
        }
    }

    /// With transport retry budget
    #[inline]
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// With retry backoff (initial and ceiling)
    #[inline]
    #[must_use]
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.retry_backoff = initial;
        self.max_retry_backoff = max;
        self
    }

    /// With page size
    #[inline]
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// With per-challenge concurrency
    #[inline]
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Fan-out actually used: at least one, never above the connection cap
    #[inline]
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.clamp(1, self.max_connections.max(1))
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check that the configuration can produce a working client
    ///
    /// # Errors
    /// `ApiError::InvalidConfig` naming the first offending field
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.base_url.trim().is_empty() {
            return Err(ApiError::InvalidConfig("base_url is empty".to_string()));
        }
        if reqwest::Url::parse(self.base_url()).is_err() {
            return Err(ApiError::InvalidConfig(format!(
                "base_url is not a valid URL: {}",
                self.base_url
            )));
        }
        if self.api_token.trim().is_empty() {
            return Err(ApiError::InvalidConfig("api_token is empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(ApiError::InvalidConfig("page_size must be positive".to_string()));
        }
        if self.max_connections == 0 {
            return Err(ApiError::InvalidConfig(
                "max_connections must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_batch_profile() {
        let config = ApiConfig::new("https://example.org/a/rest", "token");
        assert_eq!(config.max_retries, 15);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.max_idle_connections, 5);
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig::new("https://example.org/a/rest/", "token");
        assert_eq!(config.base_url(), "https://example.org/a/rest");
    }

    #[test]
    fn empty_token_rejected() {
        let err = ApiConfig::new("https://example.org", " ").validate().unwrap_err();
        assert!(err.to_string().contains("api_token"));
    }

    #[test]
    fn malformed_url_rejected() {
        let err = ApiConfig::new("not a url", "token").validate().unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }

    #[test]
    fn concurrency_is_clamped_to_pool() {
        let config = ApiConfig::new("https://example.org", "t").with_concurrency(64);
        assert_eq!(config.effective_concurrency(), 10);
        let config = config.with_concurrency(0);
        assert_eq!(config.effective_concurrency(), 1);
    }
}
