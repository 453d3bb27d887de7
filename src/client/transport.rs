//! Shared HTTP transport.
//!
//! A transport owns the connection pool and is shared by every client built
//! on top of it. [`ReqwestTransport`] is the production implementation; tests
//! substitute their own.

use crate::error::{AuthHttpError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::DEFAULT_TIMEOUT_SECS;

/// Sends fully built requests.
///
/// Implementations must be safe to share across tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response with its body unread.
    async fn send(&self, request: reqwest::Request) -> reqwest::Result<reqwest::Response>;
}

/// Transport backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom default timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AuthHttpError::transport_with_source("Failed to create HTTP client", e)
        })?;

        Ok(Self { client })
    }

    /// Wraps an existing client, sharing its pool.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
        assert!(ReqwestTransport::with_timeout(Duration::from_secs(60)).is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::from_client(Client::new());
        let url = reqwest::Url::parse(&format!("http://{}/", addr)).unwrap();
        let request = reqwest::Request::new(reqwest::Method::GET, url.clone());

        let err = transport.send(request).await.unwrap_err();
        assert!(err.is_connect());

        let request = reqwest::Request::new(reqwest::Method::GET, url);
        let err = transport.inner().execute(request).await.unwrap_err();
        assert!(err.is_connect());
    }
}
