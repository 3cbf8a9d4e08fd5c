//! Key Sources
//!
//! Where the raw key list comes from. Read on every request, never cached.

use parking_lot::RwLock;

/// Provides the raw comma-separated key configuration
pub trait KeySource: Send + Sync {
    /// Name of the setting, used in errors and logs
    fn name(&self) -> &str;

    /// Current raw value, or `None` if the setting is absent
    fn raw_keys(&self) -> Option<String>;
}

/// Reads keys from a process environment variable
#[derive(Debug, Clone)]
pub struct EnvKeySource {
    var: String,
}

impl EnvKeySource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl KeySource for EnvKeySource {
    fn name(&self) -> &str {
        &self.var
    }

    // An empty variable counts as absent
    fn raw_keys(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|v| !v.is_empty())
    }
}

/// In-memory key list that can be swapped at runtime
#[derive(Debug, Default)]
pub struct StaticKeySource {
    value: RwLock<Option<String>>,
}

impl StaticKeySource {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(Some(value.into())),
        }
    }

    /// A source with no value configured
    pub fn absent() -> Self {
        Self::default()
    }

    /// Replace the value; the next request sees it
    pub fn set(&self, value: Option<String>) {
        *self.value.write() = value;
    }
}

impl KeySource for StaticKeySource {
    fn name(&self) -> &str {
        "static keys"
    }

    fn raw_keys(&self) -> Option<String> {
        self.value.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_source_reads_fresh_value() {
        let var = "GROQ_RELAY_TEST_KEY_SOURCE";
        let source = EnvKeySource::new(var);

        std::env::remove_var(var);
        assert_eq!(source.raw_keys(), None);

        std::env::set_var(var, "a,b");
        assert_eq!(source.raw_keys().as_deref(), Some("a,b"));

        std::env::set_var(var, "c");
        assert_eq!(source.raw_keys().as_deref(), Some("c"));

        std::env::set_var(var, "");
        assert_eq!(source.raw_keys(), None);

        std::env::remove_var(var);
    }

    #[test]
    fn test_static_source_can_be_replaced() {
        let source = StaticKeySource::absent();
        assert_eq!(source.raw_keys(), None);

        source.set(Some("k1".to_string()));
        assert_eq!(source.raw_keys().as_deref(), Some("k1"));
    }
}
