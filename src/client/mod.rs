//! HTTP client module for authhttp.
//!
//! This module provides the authenticated client, the per-call request
//! value, and the transport abstraction the client sends through.

pub mod http;
pub mod request;
pub mod transport;

pub use http::{AuthHttpClient, JSON_CONTENT_TYPE};
pub use request::Request;
pub use transport::{ReqwestTransport, Transport};
