//! Relay Settings
//!
//! Defines the configuration schema for the relay.

use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Groq's OpenAI-compatible chat completion endpoint
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Model used when the caller does not name one
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Environment variable holding the comma-separated key list
pub const DEFAULT_KEYS_ENV: &str = "GROQ_API_KEYS";

/// Hosting convention the handler is bound with
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// Bound to every method; rejects non-POST itself
    #[default]
    Standalone,

    /// Bound to POST only by the router
    Routed,
}

impl std::str::FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standalone" => Ok(Flavor::Standalone),
            "routed" => Ok(Flavor::Routed),
            other => Err(format!(
                "unknown flavor {:?} (expected standalone or routed)",
                other
            )),
        }
    }
}

/// Root relay configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    /// Address the HTTP server binds to
    pub listen_addr: String,

    /// Upstream chat completion URL
    pub upstream_url: String,

    /// Model substituted when the request omits one
    pub default_model: String,

    /// Environment variable holding the key list
    pub api_keys_env: String,

    /// Hosting flavor
    pub flavor: Flavor,

    /// Path the relay handler is mounted on
    pub route_path: String,

    /// Maximum accepted request body size in bytes
    pub max_request_bytes: usize,

    /// Optional upstream timeout; unset means no timeout
    pub upstream_timeout_secs: Option<u64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            upstream_url: GROQ_ENDPOINT.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            api_keys_env: DEFAULT_KEYS_ENV.to_string(),
            flavor: Flavor::Standalone,
            route_path: "/api/groq".to_string(),
            max_request_bytes: 2 * 1024 * 1024,
            upstream_timeout_secs: None,
        }
    }
}

impl RelayConfig {
    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_secs.map(Duration::from_secs)
    }

    /// Check values that would otherwise fail later at bind or route time
    pub fn validate(&self) -> Result<()> {
        if !self.route_path.starts_with('/') {
            return Err(RelayError::Config(format!(
                "route_path must start with '/', got {:?}",
                self.route_path
            )));
        }

        self.listen_addr.parse::<SocketAddr>().map_err(|e| {
            RelayError::Config(format!("invalid listen_addr {:?}: {}", self.listen_addr, e))
        })?;

        reqwest::Url::parse(&self.upstream_url).map_err(|e| {
            RelayError::Config(format!("invalid upstream_url {:?}: {}", self.upstream_url, e))
        })?;

        if self.api_keys_env.trim().is_empty() {
            return Err(RelayError::Config("api_keys_env must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Partial configuration as read from a file; unset fields keep earlier values
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayConfigPatch {
    pub listen_addr: Option<String>,
    pub upstream_url: Option<String>,
    pub default_model: Option<String>,
    pub api_keys_env: Option<String>,
    pub flavor: Option<Flavor>,
    pub route_path: Option<String>,
    pub max_request_bytes: Option<usize>,
    pub upstream_timeout_secs: Option<u64>,
}

impl RelayConfigPatch {
    /// Apply this patch over an existing config
    pub fn apply(self, config: &mut RelayConfig) {
        if let Some(v) = self.listen_addr {
            config.listen_addr = v;
        }
        if let Some(v) = self.upstream_url {
            config.upstream_url = v;
        }
        if let Some(v) = self.default_model {
            config.default_model = v;
        }
        if let Some(v) = self.api_keys_env {
            config.api_keys_env = v;
        }
        if let Some(v) = self.flavor {
            config.flavor = v;
        }
        if let Some(v) = self.route_path {
            config.route_path = v;
        }
        if let Some(v) = self.max_request_bytes {
            config.max_request_bytes = v;
        }
        if self.upstream_timeout_secs.is_some() {
            config.upstream_timeout_secs = self.upstream_timeout_secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.upstream_url, GROQ_ENDPOINT);
        assert_eq!(config.default_model, "llama-3.3-70b-versatile");
        assert_eq!(config.api_keys_env, "GROQ_API_KEYS");
        assert_eq!(config.flavor, Flavor::Standalone);
        assert_eq!(config.upstream_timeout(), None);
    }

    #[test]
    fn test_patch_only_overrides_set_fields() {
        let patch: RelayConfigPatch = serde_json::from_str(
            r#"{
                "flavor": "routed",
                "default_model": "mixtral-8x7b-32768"
            }"#,
        )
        .unwrap();

        let mut config = RelayConfig::default();
        patch.apply(&mut config);

        assert_eq!(config.flavor, Flavor::Routed);
        assert_eq!(config.default_model, "mixtral-8x7b-32768");
        assert_eq!(config.upstream_url, GROQ_ENDPOINT);
        assert_eq!(config.route_path, "/api/groq");
    }

    #[test]
    fn test_validate() {
        assert!(RelayConfig::default().validate().is_ok());

        let bad_path = RelayConfig {
            route_path: "api/groq".to_string(),
            ..RelayConfig::default()
        };
        assert!(bad_path.validate().is_err());

        let bad_addr = RelayConfig {
            listen_addr: "localhost".to_string(),
            ..RelayConfig::default()
        };
        assert!(bad_addr.validate().is_err());

        let bad_url = RelayConfig {
            upstream_url: "not a url".to_string(),
            ..RelayConfig::default()
        };
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_flavor_from_str() {
        assert_eq!(" Routed ".parse::<Flavor>().unwrap(), Flavor::Routed);
        assert_eq!("standalone".parse::<Flavor>().unwrap(), Flavor::Standalone);
        assert!("edge".parse::<Flavor>().is_err());
    }
}
