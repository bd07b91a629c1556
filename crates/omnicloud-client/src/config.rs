//! Configuration for the OmniCloud HTTP client

use crate::error::{ClientError, Result};

/// Default API root used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8002/api/v1";

/// Environment variable overriding the API root
pub const BASE_URL_ENV: &str = "OMNICLOUD_API_URL";

/// Configuration for [`PlatformHttpClient`](crate::http::PlatformHttpClient)
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:8002/api/v1`
    pub base_url: String,
    /// Connection timeout in milliseconds. `None` leaves reqwest's default.
    pub connect_timeout_ms: Option<u64>,
    /// Whole-request timeout in milliseconds. `None` means requests never time out.
    pub request_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_ms: None,
            request_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given API root
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    /// Build a config from `OMNICLOUD_API_URL`, falling back to [`DEFAULT_BASE_URL`]
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, request_ms: u64) -> Self {
        self.connect_timeout_ms = Some(connect_ms);
        self.request_timeout_ms = Some(request_ms);
        self
    }

    /// API root without trailing slashes
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(self.normalized_base_url())
            .map_err(|e| ClientError::Validation(format!("invalid base url: {}", e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::Validation(format!(
                "unsupported url scheme: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8002/api/v1");
        assert!(config.connect_timeout_ms.is_none());
        assert!(config.request_timeout_ms.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("https://api.example.com/api/v1/")
            .with_timeouts(3000, 15000);

        assert_eq!(config.normalized_base_url(), "https://api.example.com/api/v1");
        assert_eq!(config.connect_timeout_ms, Some(3000));
        assert_eq!(config.request_timeout_ms, Some(15000));
    }

    #[test]
    fn test_config_validate() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::new("not a url").validate().is_err());
        assert!(ClientConfig::new("ftp://example.com").validate().is_err());
    }
}
