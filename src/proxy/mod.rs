//! Proxy Module
//!
//! Framework-independent request handling. The server adapters translate
//! to and from these types.

pub mod handler;

pub use handler::ChatProxy;

use crate::config::Flavor;
use crate::error::RelayError;
use bytes::Bytes;
use http::{Method, StatusCode};

/// Inbound request as seen by the handler
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    pub body: Bytes,
}

impl ProxyRequest {
    pub fn post(body: impl Into<Bytes>) -> Self {
        Self {
            method: Method::POST,
            body: body.into(),
        }
    }
}

/// Handler output. The body is always JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ProxyResponse {
    /// 200 with the upstream body untouched
    pub fn passthrough(body: Bytes) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// Error status and JSON body for the given flavor
    pub fn from_error(err: &RelayError, flavor: Flavor) -> Self {
        let body = serde_json::to_vec(&err.to_body(flavor))
            .map(Bytes::from)
            .unwrap_or_else(|_| Bytes::from_static(br#"{"error":"Internal Server Error"}"#));

        Self {
            status: err.status(),
            body,
        }
    }

    /// Parse the body as JSON, mostly useful in tests
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }
}
