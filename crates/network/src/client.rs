// crates/network/src/client.rs
//! Blocking HTTP client bound to one Plex server

use crate::error::{NetworkError, NetworkResult};
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Reject self-signed or otherwise untrusted certificates
    pub verify_certificates: bool,
    /// Sent as `X-Plex-Client-Identifier`
    pub client_identifier: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("plex-cleanup/{}", env!("CARGO_PKG_VERSION")),
            verify_certificates: false,
            client_identifier: "plex-cleanup".to_string(),
        }
    }
}

/// HTTP client that authenticates every request with a Plex token
pub struct PlexHttpClient {
    inner: ReqwestClient,
    base_url: Url,
}

impl PlexHttpClient {
    /// Creates a client for `base_url`; no request is made
    pub fn new(base_url: &str, token: &str, config: &ClientConfig) -> NetworkResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| NetworkError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(NetworkError::InvalidUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-plex-product",
            HeaderValue::from_static("plex-cleanup"),
        );
        headers.insert(
            "x-plex-version",
            HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
        );
        headers.insert(
            "x-plex-client-identifier",
            HeaderValue::from_str(&config.client_identifier)
                .map_err(|e| NetworkError::InvalidToken(format!("client identifier: {}", e)))?,
        );

        let mut token_value = HeaderValue::from_str(token.trim())
            .map_err(|e| NetworkError::InvalidToken(e.to_string()))?;
        token_value.set_sensitive(true);
        headers.insert("x-plex-token", token_value);

        if !config.verify_certificates {
            log::debug!("TLS certificate verification disabled for {}", base_url);
        }

        let inner = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_certificates)
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self { inner, base_url })
    }

    /// Returns the server base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an absolute API path against the server base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Performs a GET request and decodes the JSON body
    pub fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> NetworkResult<T>
    where
        T: DeserializeOwned,
    {
        self.send(self.inner.get(self.endpoint(path)).query(query))?
            .json::<T>()
            .map_err(|e| NetworkError::Decode(format!("{}: {}", path, e)))
    }

    /// Performs a PUT request, discarding the body
    pub fn put(&self, path: &str, query: &[(&str, &str)]) -> NetworkResult<()> {
        self.send(self.inner.put(self.endpoint(path)).query(query))?;
        Ok(())
    }

    /// Performs a DELETE request, discarding the body
    pub fn delete(&self, path: &str) -> NetworkResult<()> {
        self.send(self.inner.delete(self.endpoint(path)))?;
        Ok(())
    }

    /// Sends a request and maps non-success statuses to errors
    fn send(&self, request: RequestBuilder) -> NetworkResult<Response> {
        let response = request.send().map_err(NetworkError::Http)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        log::debug!("{} answered {}", response.url().path(), status);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(NetworkError::Unauthorized);
        }

        Err(NetworkError::Status {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.verify_certificates);
        assert!(config.user_agent.starts_with("plex-cleanup/"));
    }

    #[test]
    fn test_client_creation() {
        let client = PlexHttpClient::new("http://127.0.0.1:32400", "token", &ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let result = PlexHttpClient::new("not a url", "token", &ClientConfig::default());
        assert!(matches!(result, Err(NetworkError::InvalidUrl(_))));

        let result = PlexHttpClient::new("ftp://plex.local", "token", &ClientConfig::default());
        assert!(matches!(result, Err(NetworkError::InvalidUrl(_))));
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let result = PlexHttpClient::new("http://plex:32400", "abc\ndef", &ClientConfig::default());
        assert!(matches!(result, Err(NetworkError::InvalidToken(_))));
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client = PlexHttpClient::new("https://plex.local:32400/", "token", &ClientConfig::default())
            .expect("Failed to create client");
        assert_eq!(
            client.endpoint("/library/sections"),
            "https://plex.local:32400/library/sections"
        );

        let client = PlexHttpClient::new("http://host/plex", "token", &ClientConfig::default())
            .expect("Failed to create client");
        assert_eq!(client.endpoint("/library/sections"), "http://host/plex/library/sections");
    }
}
