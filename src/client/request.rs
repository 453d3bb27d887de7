//! Per-call request values.

use crate::error::{AuthHttpError, Result};
use reqwest::Method;
use serde::Serialize;
use std::time::Duration;
use tracing::error;

/// A single request to be sent by [`AuthHttpClient`](super::AuthHttpClient).
///
/// The JSON body is serialized when the request is built, so a payload that
/// cannot be encoded never reaches the transport.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl Request {
    /// Creates a request without a body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            timeout: None,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Creates a POST request with a JSON body.
    pub fn post<T: Serialize + ?Sized>(path: impl Into<String>, payload: &T) -> Result<Self> {
        Self::new(Method::POST, path).json(payload)
    }

    /// Creates a PUT request with a JSON body.
    pub fn put<T: Serialize + ?Sized>(path: impl Into<String>, payload: &T) -> Result<Self> {
        Self::new(Method::PUT, path).json(payload)
    }

    /// Serializes `payload` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        let body = serde_json::to_vec(payload).map_err(|e| {
            error!(
                method = %self.method,
                path = %self.path,
                error = %e,
                "Failed to serialize request payload"
            );
            AuthHttpError::Serialization { source: e }
        })?;

        self.body = Some(body);
        Ok(self)
    }

    /// Sets a deadline for this call, overriding the transport default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn into_parts(self) -> (Method, String, Option<Vec<u8>>, Option<Duration>) {
        (self.method, self.path, self.body, self.timeout)
    }
}
