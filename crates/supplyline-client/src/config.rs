//! # Client Configuration
//!
//! Connection settings for the remote Cart/Order Service.

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Default service endpoint for local development.
const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Configuration for the Cart/Order Service client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL, no trailing slash (e.g. "https://api.supplyline.io/api").
    pub base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Creates a config for an explicit base URL.
    ///
    /// The URL is validated up front so a typo fails at construction,
    /// not on the first request.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let trimmed = base_url.trim_end_matches('/');
        Url::parse(trimmed)
            .map_err(|e| ClientError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(ClientConfig {
            base_url: trimmed.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        })
    }

    /// Creates a config from the provided URL, the `SUPPLYLINE_API_URL`
    /// environment variable, or the local-development default, in that
    /// order.
    pub fn from_env_or(base_url: Option<String>) -> ClientResult<Self> {
        let raw = base_url
            .or_else(|| std::env::var("SUPPLYLINE_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_url() {
        let config = ClientConfig::new("https://api.supplyline.io/api/").unwrap();
        assert_eq!(config.base_url, "https://api.supplyline.io/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = ClientConfig::new("not a url").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_explicit_url_wins_over_default() {
        let config =
            ClientConfig::from_env_or(Some("http://cart.internal:9000".to_string())).unwrap();
        assert_eq!(config.base_url, "http://cart.internal:9000");
    }
}
