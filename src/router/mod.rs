//! Router Module
//!
//! Key pool parsing, key sources and random key selection.

pub mod key_pool;
pub mod key_source;

pub use key_pool::KeyPool;
pub use key_source::{EnvKeySource, KeySource, StaticKeySource};
