//! Discovery client
//!
//! Looks services up through a catalog's `GET /search` endpoint. The
//! dispatcher only sees the [`DiscoveryClient`] trait, so tests can swap the
//! HTTP implementation for a canned one.

use async_trait::async_trait;
use protoai_core::{SearchResponse, SearchResult};
use thiserror::Error;

use crate::config::DiscoveryConfig;

/// Failure reaching or reading from the catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("Failed to build HTTP client: {reason}")]
    ClientBuild { reason: String },

    #[error("Catalog request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Catalog at {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Catalog response from {url} could not be decoded: {reason}")]
    Decode { url: String, reason: String },
}

/// Source of discovered services.
#[async_trait]
pub trait DiscoveryClient: Send + Sync {
    /// Find services carrying any of `tags`; `None` or an empty slice lists everything.
    async fn discover(&self, tags: Option<&[String]>) -> Result<Vec<SearchResult>, DiscoveryError>;
}

/// [`DiscoveryClient`] backed by a remote catalog's search endpoint.
///
/// One GET per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpDiscoveryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDiscoveryClient {
    /// Wrap an existing client handle.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from configuration.
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| DiscoveryError::ClientBuild {
            reason: e.to_string(),
        })?;
        Ok(Self::new(client, config.catalog_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl DiscoveryClient for HttpDiscoveryClient {
    async fn discover(&self, tags: Option<&[String]>) -> Result<Vec<SearchResult>, DiscoveryError> {
        let url = self.search_url();
        let mut request = self.client.get(&url);
        if let Some(tags) = tags.filter(|t| !t.is_empty()) {
            request = request.query(&[("tags", tags.join(","))]);
        }

        let response = request.send().await.map_err(|e| DiscoveryError::Request {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| DiscoveryError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(
            url = %url,
            total_count = body.total_count,
            "Discovery search completed"
        );
        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpDiscoveryClient::new(reqwest::Client::new(), "http://catalog:8000/");
        assert_eq!(client.base_url(), "http://catalog:8000");
        assert_eq!(client.search_url(), "http://catalog:8000/search");
    }

    #[test]
    fn test_from_config_with_timeout() -> Result<(), DiscoveryError> {
        let config = DiscoveryConfig::default()
            .with_catalog_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_millis(250));
        let client = HttpDiscoveryClient::from_config(&config)?;
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_request_error() -> Result<(), DiscoveryError> {
        // Port 9 (discard) is closed on test hosts; the connect fails fast.
        let config = DiscoveryConfig::default()
            .with_catalog_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2));
        let client = HttpDiscoveryClient::from_config(&config)?;

        match client.discover(None).await {
            Err(DiscoveryError::Request { url, .. }) => {
                assert_eq!(url, "http://127.0.0.1:9/search");
            }
            other => panic!("expected request error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_error_text() {
        let err = DiscoveryError::Status {
            url: "http://catalog/search".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "Catalog at http://catalog/search returned HTTP 503");
    }
}
