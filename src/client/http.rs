//! HTTP Client
//!
//! Single-attempt upstream client. Returns the status and raw body without
//! interpreting either.

use crate::error::{RelayError, Result};
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Raw upstream answer
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client for the upstream provider
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client; `timeout` of `None` leaves requests unbounded
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// POST `body` as JSON with a bearer key. One attempt, no retries.
    pub async fn post_json<T>(&self, url: &str, body: &T, api_key: &str) -> Result<UpstreamResponse>
    where
        T: Serialize,
    {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| RelayError::Config(format!("Invalid API key format: {}", e)))?,
        );

        let body_json = serde_json::to_vec(body)
            .map_err(|e| RelayError::Internal(format!("Failed to encode request: {}", e)))?;

        let resp = self
            .client
            .post(url)
            .headers(headers)
            .body(body_json)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_client_creation() {
        assert!(HttpClient::new(None).is_ok());
        assert!(HttpClient::new(Some(Duration::from_secs(5))).is_ok());
    }

    #[tokio::test]
    async fn test_post_sends_headers_and_returns_raw_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer secret")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(json!({ "hello": "world" })))
            .with_status(418)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = HttpClient::new(None).unwrap();
        let url = format!("{}/v1/chat/completions", server.url());
        let resp = client
            .post_json(&url, &json!({ "hello": "world" }), "secret")
            .await
            .unwrap();

        assert_eq!(resp.status, StatusCode::IM_A_TEAPOT);
        assert!(!resp.is_success());
        assert_eq!(resp.text(), "not json at all");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_key_with_newline_is_rejected() {
        let client = HttpClient::new(None).unwrap();
        let err = client
            .post_json("http://127.0.0.1:1/", &json!({}), "bad\nkey")
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::Config(_)));
    }
}
