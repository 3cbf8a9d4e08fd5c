//! API Module
//!
//! Request types for the relay and the upstream provider.

pub mod completion;

pub use completion::{ChatEnvelope, UpstreamRequest, MAX_TOKENS, TEMPERATURE, TOP_P};
