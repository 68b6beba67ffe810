//! HTTP fetch primitive
//!
//! A single GET with:
//! - the static `api_token` header attached to every request
//! - transport-level retries with exponential backoff
//! - a cap on in-flight requests
//! - exactly-200 success semantics; any other status is a typed failure

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::pagination::fetch_all_pages;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

/// Header carrying the API token
pub const API_TOKEN_HEADER: &str = "api_token";

/// IdeaScale REST client
#[derive(Debug, Clone)]
pub struct IdeascaleClient {
    http: reqwest::Client,
    config: ApiConfig,
    permits: Arc<Semaphore>,
}

impl IdeascaleClient {
    /// Build a client from validated configuration
    ///
    /// # Errors
    /// - `ApiError::InvalidConfig` if the configuration is unusable
    /// - `ApiError::ClientBuild` if the TLS/HTTP stack cannot be initialised
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut token = HeaderValue::from_str(&config.api_token).map_err(|_| {
            ApiError::InvalidConfig("api_token contains invalid header characters".to_string())
        })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_TOKEN_HEADER), token);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(config.max_idle_connections);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            config: config.clone(),
            permits: Arc::new(Semaphore::new(config.max_connections)),
        })
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL for an endpoint path
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url(), endpoint)
    }

    /// GET an endpoint and return the JSON body verbatim
    ///
    /// # Errors
    /// - `ApiError::Transport` once the retry budget is spent
    /// - `ApiError::RemoteRequestFailed` on any status other than 200
    /// - `ApiError::Decode` if the body is not JSON
    pub async fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> ApiResult<Value> {
        let url = self.url(endpoint);
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ApiError::LimiterClosed)?;

        let (response, attempts) = self.send_with_retries(&url, query).await?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), url = %url, "IdeaScale request failed");
            return Err(ApiError::RemoteRequestFailed {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            attempts,
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { url, source })
    }

    /// GET an endpoint and decode the body into `T`
    ///
    /// # Errors
    /// As [`get_json`](Self::get_json), plus `ApiError::Decode` when the
    /// JSON does not match `T`
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let value = self.get_json(endpoint, &[]).await?;
        serde_json::from_value(value).map_err(|source| ApiError::Decode {
            url: self.url(endpoint),
            source,
        })
    }

    /// Walk a page-indexed endpoint until exhaustion
    ///
    /// `endpoint` receives `(page, page_size)` and returns the path for
    /// that page.
    ///
    /// # Errors
    /// The first error of any page; partial results are discarded
    pub async fn get_all_pages<T, E>(&self, endpoint: E) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
        E: Fn(usize, usize) -> String,
    {
        let page_size = self.config.page_size;
        fetch_all_pages(page_size, |page| {
            let path = endpoint(page, page_size);
            async move { self.get::<Vec<T>>(&path).await }
        })
        .await
    }

    async fn send_with_retries(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<(reqwest::Response, u32)> {
        let max_retries = self.config.max_retries;
        let mut attempt = 0u32;
        let mut delay = self.config.retry_backoff;

        loop {
            attempt += 1;
            debug!(url, attempt, "GET");

            let mut request = self.http.get(url);
            if !query.is_empty() {
                request = request.query(query);
            }

            match request.send().await {
                Ok(response) => return Ok((response, attempt)),
                Err(e) if is_transient(&e) && attempt <= max_retries => {
                    warn!(
                        url,
                        attempt,
                        max_retries,
                        error = %e,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "transport error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = std::cmp::min(delay * 2, self.config.max_retry_backoff);
                }
                Err(source) => {
                    error!(url, attempt, error = %source, "transport error, giving up");
                    return Err(ApiError::Transport {
                        url: url.to_string(),
                        attempts: attempt,
                        source,
                    });
                }
            }
        }
    }
}

/// Failures that happened before any response arrived
fn is_transient(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request()
}
