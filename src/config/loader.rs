//! Configuration Loader
//!
//! Builds the relay configuration from built-in defaults, config files and
//! environment overrides, in that order.

use crate::config::settings::{RelayConfig, RelayConfigPatch};
use crate::error::{RelayError, Result};
use std::path::{Path, PathBuf};

/// Configuration loader with support for multiple sources
pub struct ConfigLoader {
    config: RelayConfig,
}

impl ConfigLoader {
    /// Create a new config loader and load from default locations and the environment
    pub fn new() -> Result<Self> {
        let mut loader = Self {
            config: RelayConfig::default(),
        };

        loader.load_from_default_paths()?;
        loader.apply_env_overrides(|name| std::env::var(name).ok())?;
        loader.config.validate()?;

        Ok(loader)
    }

    /// Create a loader with a specific config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut loader = Self {
            config: RelayConfig::default(),
        };

        loader.load_from_file(path)?;
        loader.apply_env_overrides(|name| std::env::var(name).ok())?;
        loader.config.validate()?;

        Ok(loader)
    }

    /// Load configuration from default paths
    fn load_from_default_paths(&mut self) -> Result<()> {
        for path in Self::get_config_paths() {
            if path.exists() {
                self.load_from_file(&path)?;
            }
        }

        Ok(())
    }

    /// Get list of config paths to check, lowest precedence first
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".groq-relay").join("config.json"));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("groq-relay").join("config.json"));
        }

        paths.push(PathBuf::from("groq-relay.json"));

        if let Ok(custom_path) = std::env::var("GROQ_RELAY_CONFIG") {
            paths.push(PathBuf::from(custom_path));
        }

        paths
    }

    /// Load configuration from a specific file
    fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RelayError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let patch: RelayConfigPatch = serde_json::from_str(&content).map_err(|e| {
            RelayError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "loaded relay config file");
        patch.apply(&mut self.config);
        Ok(())
    }

    /// Apply environment overrides; `lookup` resolves a variable name to its value
    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get("LISTEN_ADDR") {
            self.config.listen_addr = v;
        }
        if let Some(v) = get("GROQ_RELAY_UPSTREAM_URL") {
            self.config.upstream_url = v;
        }
        if let Some(v) = get("GROQ_RELAY_DEFAULT_MODEL") {
            self.config.default_model = v;
        }
        if let Some(v) = get("GROQ_RELAY_FLAVOR") {
            self.config.flavor = v.parse().map_err(RelayError::Config)?;
        }
        if let Some(v) = get("GROQ_RELAY_ROUTE_PATH") {
            self.config.route_path = v;
        }
        if let Some(v) = get("GROQ_RELAY_MAX_REQUEST_BYTES") {
            self.config.max_request_bytes = v.parse().map_err(|e| {
                RelayError::Config(format!("invalid GROQ_RELAY_MAX_REQUEST_BYTES {:?}: {}", v, e))
            })?;
        }
        if let Some(v) = get("GROQ_RELAY_UPSTREAM_TIMEOUT_SECS") {
            let secs = v.parse().map_err(|e| {
                RelayError::Config(format!(
                    "invalid GROQ_RELAY_UPSTREAM_TIMEOUT_SECS {:?}: {}",
                    v, e
                ))
            })?;
            self.config.upstream_timeout_secs = Some(secs);
        }

        Ok(())
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Take ownership of the configuration
    pub fn into_config(self) -> RelayConfig {
        self.config
    }
}
