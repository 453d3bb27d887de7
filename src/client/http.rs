//! Authenticated HTTP client.
//!
//! Every call is one request/response exchange: the bearer token is attached,
//! the body (if any) is sent as JSON, and the response is returned as raw
//! bytes or turned into an [`AuthHttpError`].

use crate::client::request::Request;
use crate::client::transport::{ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::{AuthHttpError, Result};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, Url};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info_span, Instrument};
use uuid::Uuid;

/// Content type sent with every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Statuses above this value are errors.
const LAST_SUCCESS_STATUS: u16 = 299;

/// Client that sends bearer-authenticated requests to one host.
///
/// Cloning is cheap and clones share the transport.
#[derive(Clone)]
pub struct AuthHttpClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl AuthHttpClient {
    /// Creates a client with its own pooled transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(config.timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client on top of an existing transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Sends a GET request to `path`.
    pub async fn get(&self, path: &str) -> Result<Vec<u8>> {
        self.execute(Request::get(path)).await
    }

    /// Sends `payload` as JSON in a POST request to `path`.
    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<Vec<u8>> {
        self.execute(Request::post(path, payload)?).await
    }

    /// Sends `payload` as JSON in a PUT request to `path`.
    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<Vec<u8>> {
        self.execute(Request::put(path, payload)?).await
    }

    /// Sends a DELETE request to `path`.
    pub async fn delete(&self, path: &str) -> Result<Vec<u8>> {
        self.execute(Request::delete(path)).await
    }

    /// Sends `request` and returns the response body.
    ///
    /// # Errors
    /// * [`AuthHttpError::Transport`] if the request cannot be built or sent,
    ///   or the body cannot be read
    /// * [`AuthHttpError::HttpStatus`] if the server answers above 299
    pub async fn execute(&self, request: Request) -> Result<Vec<u8>> {
        let span = info_span!(
            "http_request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            path = %request.path(),
        );

        self.dispatch(request).instrument(span).await
    }

    async fn dispatch(&self, request: Request) -> Result<Vec<u8>> {
        let request = self.build(request)?;
        let url = request.url().to_string();
        debug!(url = %url, "Sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            error!(url = %url, error = %e, "Failed to send request");
            AuthHttpError::transport_with_source(&url, e)
        })?;

        read_response(&url, response).await
    }

    /// Turns a [`Request`] into a wire request with auth and content headers.
    fn build(&self, request: Request) -> Result<reqwest::Request> {
        let (method, path, body, timeout) = request.into_parts();
        let target = format!("{}{}", self.config.host, path);

        let url = Url::parse(&target).map_err(|e| {
            error!(url = %target, error = %e, "Invalid request URL");
            AuthHttpError::transport_with_source(&target, e)
        })?;

        let mut authorization = HeaderValue::from_str(&self.config.bearer_token).map_err(|e| {
            error!(url = %target, "Bearer token is not a valid header value");
            AuthHttpError::transport_with_source(&target, e)
        })?;
        authorization.set_sensitive(true);

        let mut wire = reqwest::Request::new(method, url);
        wire.headers_mut().insert(AUTHORIZATION, authorization);

        if let Some(body) = body {
            wire.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            *wire.body_mut() = Some(body.into());
        }

        if let Some(timeout) = timeout {
            *wire.timeout_mut() = Some(timeout);
        }

        Ok(wire)
    }
}

impl fmt::Debug for AuthHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Reads the body, consuming the response.
async fn read_response(url: &str, response: Response) -> Result<Vec<u8>> {
    let status = response.status();

    if status.as_u16() > LAST_SUCCESS_STATUS {
        // Error bodies are diagnostic only; an unreadable one is not a failure.
        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| error_message(&body));

        error!(
            url = %url,
            status = %status,
            message = message.as_deref().unwrap_or_default(),
            "Request returned error status"
        );

        return Err(AuthHttpError::HttpStatus {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await.map_err(|e| {
        error!(url = %url, status = %status, error = %e, "Failed to read response body");
        AuthHttpError::transport_with_source(url, e)
    })?;

    debug!(url = %url, status = %status, bytes = body.len(), "Request succeeded");
    Ok(body.to_vec())
}

/// Extracts the string `message` field from a JSON object body.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}
