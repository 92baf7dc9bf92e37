//! HTTP client with connection pooling

use relget_errors::{Error, NetworkError};
use reqwest::{Client, Response};
use std::time::Duration;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    /// Longest wait for the next read on a connection. A slow but steady
    /// transfer never hits it, so whole downloads are bounded only by a
    /// caller's deadline.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: "relget".to_string(),
        }
    }
}

impl NetConfig {
    /// Configuration identifying the calling tool as `<name>/<version>`
    ///
    /// The version comes from the caller's own build metadata so the client
    /// identifier always names the binary actually running.
    #[must_use]
    pub fn for_tool(name: &str, version: &str) -> Self {
        Self {
            user_agent: format!("{name}/{version}"),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }
}

/// HTTP client wrapper
///
/// Requests are issued exactly once. Failures surface to the caller, who
/// decides whether a second attempt is worth making.
#[derive(Clone, Debug)]
pub struct NetClient {
    client: Client,
    config: NetConfig,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .read_timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ConnectionRefused(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns an error on timeouts, connection failures or other transport
    /// errors. HTTP error statuses are returned as a normal response.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_error(&e, url))
    }

    /// Identifier sent with every request
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.config.user_agent
    }
}

/// Convert a reqwest transport error into the network error taxonomy
pub(crate) fn map_transport_error(error: &reqwest::Error, url: &str) -> Error {
    if error.is_timeout() {
        NetworkError::Timeout {
            url: url.to_string(),
        }
        .into()
    } else if error.is_connect() {
        NetworkError::ConnectionRefused(format!("{url}: {error}")).into()
    } else {
        NetworkError::DownloadFailed(format!("{url}: {error}")).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_tool_sets_user_agent() {
        let config = NetConfig::for_tool("relget", "1.4.2");
        assert_eq!(config.user_agent, "relget/1.4.2");
        assert_eq!(config.timeout, NetConfig::default().timeout);
    }

    #[test]
    fn test_with_timeouts() {
        let config = NetConfig::default()
            .with_timeouts(Duration::from_secs(5), Duration::from_secs(1));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_client_keeps_user_agent() {
        let client = NetClient::new(NetConfig::for_tool("relget", "0.1.0")).unwrap();
        assert_eq!(client.user_agent(), "relget/0.1.0");
    }
}
