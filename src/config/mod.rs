//! Configuration Module
//!
//! Handles relay configuration loading.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{
    Flavor, RelayConfig, RelayConfigPatch, DEFAULT_KEYS_ENV, DEFAULT_MODEL, GROQ_ENDPOINT,
};
