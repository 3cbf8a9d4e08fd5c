//! groq-relay - Groq chat completion relay
//!
//! Forwards OpenAI-style chat completion requests to Groq, picking one of the
//! configured API keys at random for each request and relaying the upstream
//! answer unchanged.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod proxy;
pub mod router;
pub mod server;

pub use api::{ChatEnvelope, UpstreamRequest};
pub use client::{HttpClient, UpstreamResponse};
pub use config::{ConfigLoader, Flavor, RelayConfig};
pub use error::{RelayError, Result};
pub use proxy::{ChatProxy, ProxyRequest, ProxyResponse};
pub use router::{EnvKeySource, KeyPool, KeySource, StaticKeySource};
pub use server::{app, app_from_config, routed_router, standalone_router};
