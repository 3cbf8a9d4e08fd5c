//! Client Module
//!
//! Outbound HTTP to the upstream provider.

pub mod http;

pub use self::http::{HttpClient, UpstreamResponse};
