//! Chat Completion Relay
//!
//! One linear pass per request: method check, body parse, key selection,
//! upstream call, relay.

use crate::api::{ChatEnvelope, UpstreamRequest};
use crate::client::HttpClient;
use crate::config::{Flavor, RelayConfig};
use crate::error::{RelayError, Result};
use crate::proxy::{ProxyRequest, ProxyResponse};
use crate::router::{EnvKeySource, KeyPool, KeySource};
use http::Method;
use std::sync::Arc;

/// The relay handler. Holds no per-request state.
pub struct ChatProxy {
    /// Relay configuration
    config: RelayConfig,

    /// Where the key list is read from on each request
    keys: Arc<dyn KeySource>,

    /// HTTP client
    http_client: HttpClient,
}

impl ChatProxy {
    /// Create a relay that reads keys from the configured environment variable
    pub fn new(config: RelayConfig) -> Result<Self> {
        let keys = Arc::new(EnvKeySource::new(config.api_keys_env.clone()));
        Self::with_key_source(config, keys)
    }

    /// Create a relay with a custom key source
    pub fn with_key_source(config: RelayConfig, keys: Arc<dyn KeySource>) -> Result<Self> {
        let http_client = HttpClient::new(config.upstream_timeout())?;
        Ok(Self {
            config,
            keys,
            http_client,
        })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn flavor(&self) -> Flavor {
        self.config.flavor
    }

    /// Handle one request. Every failure becomes an error response.
    pub async fn handle(&self, request: ProxyRequest) -> ProxyResponse {
        match self.relay(request).await {
            Ok(response) => response,
            Err(err) => {
                self.log_failure(&err);
                ProxyResponse::from_error(&err, self.flavor())
            }
        }
    }

    async fn relay(&self, request: ProxyRequest) -> Result<ProxyResponse> {
        if self.flavor() == Flavor::Standalone && request.method != Method::POST {
            return Err(RelayError::MethodNotAllowed);
        }

        let envelope = ChatEnvelope::from_slice(&request.body)?;

        let pool = self.key_pool()?;
        let (index, api_key) = pool
            .choose()
            .ok_or_else(|| RelayError::NoValidKeys(self.keys.name().to_string()))?;
        tracing::debug!(key_index = index, pool_size = pool.len(), "selected upstream key");

        let body = UpstreamRequest::from_envelope(envelope, &self.config.default_model);
        let upstream = self
            .http_client
            .post_json(&self.config.upstream_url, &body, api_key)
            .await?;

        if !upstream.is_success() {
            return Err(RelayError::Upstream {
                status: upstream.status,
                body: upstream.text(),
            });
        }

        Ok(ProxyResponse::passthrough(upstream.body))
    }

    /// Read and parse the key list. Never cached.
    fn key_pool(&self) -> Result<KeyPool> {
        let raw = self
            .keys
            .raw_keys()
            .ok_or_else(|| RelayError::MissingKeys(self.keys.name().to_string()))?;

        let pool = KeyPool::parse(&raw);
        if pool.is_empty() {
            return Err(RelayError::NoValidKeys(self.keys.name().to_string()));
        }

        Ok(pool)
    }

    fn log_failure(&self, err: &RelayError) {
        match err {
            RelayError::MethodNotAllowed => {
                tracing::debug!("rejected non-POST request");
            }
            RelayError::MissingKeys(source) => {
                tracing::error!(source = %source, "missing upstream API key configuration");
            }
            RelayError::NoValidKeys(source) => {
                tracing::error!(source = %source, "no valid upstream API keys configured");
            }
            RelayError::Upstream { status, body } => {
                tracing::error!(status = status.as_u16(), body = %body, "upstream returned an error");
            }
            other => {
                tracing::error!(error = %other, "relay request failed");
            }
        }
    }
}
