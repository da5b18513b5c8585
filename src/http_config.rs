//! HTTP client configuration module
//!
//! Centralizes connection settings and default headers for the remote
//! data service client. Requests are never retried and carry no
//! request-level timeout; a failed call is reported once to the caller.

use crate::config::RemoteSettings;
use crate::error::StorageError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

pub const CLIENT_INFO: &str = "opencalendar";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// TCP keep-alive interval
    pub tcp_keepalive: Duration,
    /// How long idle pooled connections are kept
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            tcp_keepalive: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 2,
        }
    }
}

impl HttpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headers every data service request carries: the access key both as
    /// `apikey` and as a bearer token, plus a client identifier.
    pub fn default_headers(settings: &RemoteSettings) -> Result<HeaderMap, StorageError> {
        let key = HeaderValue::from_str(&settings.anon_key)
            .map_err(|_| StorageError::setup("access key is not a valid header value"))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.anon_key))
            .map_err(|_| StorageError::setup("access key is not a valid header value"))?;

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("apikey"), key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            HeaderName::from_static("x-client-info"),
            HeaderValue::from_static(CLIENT_INFO),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Build a reqwest client for the data service.
    pub fn build_client(&self, settings: &RemoteSettings) -> Result<Client, StorageError> {
        ClientBuilder::new()
            .default_headers(Self::default_headers(settings)?)
            .connect_timeout(self.connect_timeout)
            .tcp_keepalive(self.tcp_keepalive)
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .build()
            .map_err(|e| StorageError::setup(format!("failed to build HTTP client: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn settings(key: &str) -> RemoteSettings {
        RemoteSettings {
            url: Url::parse("https://demo.supabase.co").unwrap(),
            anon_key: key.to_string(),
        }
    }

    #[test]
    fn test_default_headers() {
        let headers = HttpConfig::default_headers(&settings("secret")).unwrap();
        assert_eq!(headers["apikey"], "secret");
        assert_eq!(headers[AUTHORIZATION], "Bearer secret");
        assert_eq!(headers["x-client-info"], CLIENT_INFO);
    }

    #[test]
    fn test_invalid_key_is_setup_error() {
        let result = HttpConfig::default_headers(&settings("bad\nkey"));
        assert!(matches!(result, Err(StorageError::Setup(_))));
    }

    #[test]
    fn test_build_client() {
        assert!(HttpConfig::new().build_client(&settings("secret")).is_ok());
    }
}
