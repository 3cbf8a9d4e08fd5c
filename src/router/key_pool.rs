//! API Key Pool
//!
//! Parses the comma-separated key list and picks one key per request.

use rand::Rng;

/// Keys parsed from one configuration string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPool {
    keys: Vec<String>,
}

impl KeyPool {
    /// Split on commas, trim each segment, drop empty ones.
    ///
    /// Duplicates are kept, so a key listed twice is picked twice as often.
    pub fn parse(raw: &str) -> Self {
        Self {
            keys: raw
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Get the number of keys in the pool
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Pick a key uniformly at random, with its index in the pool
    pub fn choose(&self) -> Option<(usize, &str)> {
        self.choose_with(&mut rand::thread_rng())
    }

    /// Same as [`KeyPool::choose`] with a caller-supplied RNG
    pub fn choose_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, &str)> {
        if self.keys.is_empty() {
            return None;
        }

        let idx = rng.gen_range(0..self.keys.len());
        Some((idx, self.keys[idx].as_str()))
    }
}
