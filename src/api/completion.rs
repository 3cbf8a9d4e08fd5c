//! Chat Completion API
//!
//! The inbound request envelope and the request forwarded upstream.

use crate::error::{RelayError, Result};
use serde::Serialize;
use serde_json::Value;

/// Sampling temperature sent upstream
pub const TEMPERATURE: f64 = 0.7;

/// Maximum tokens to generate
pub const MAX_TOKENS: u32 = 4096;

/// Top-p sampling
pub const TOP_P: f64 = 1.0;

/// Caller-supplied request body.
///
/// Only `messages` and `model` are read; everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatEnvelope {
    /// Conversation messages, forwarded untouched
    pub messages: Option<Value>,

    /// Requested model
    pub model: Option<Value>,
}

impl ChatEnvelope {
    /// Parse an envelope from a raw request body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Extract the envelope fields from a parsed body.
    ///
    /// A `null` body has no fields to read and is rejected; any other
    /// non-object body yields an empty envelope.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(mut map) => Ok(Self {
                messages: map.remove("messages"),
                model: map.remove("model"),
            }),
            Value::Null => Err(RelayError::InvalidBody(
                "request body must be a JSON object, got null".to_string(),
            )),
            _ => Ok(Self::default()),
        }
    }

    /// The model to request: the caller's, unless missing, null or empty
    pub fn model_or(&self, default_model: &str) -> Value {
        match &self.model {
            None | Some(Value::Null) => Value::String(default_model.to_string()),
            Some(Value::String(s)) if s.is_empty() => Value::String(default_model.to_string()),
            Some(model) => model.clone(),
        }
    }
}

/// Body of the upstream chat completion call.
///
/// Field order is the wire order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpstreamRequest {
    pub model: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Value>,

    pub temperature: f64,

    pub max_tokens: u32,

    pub top_p: f64,

    pub stream: bool,

    /// Always serialized, as `null` when unset
    pub stop: Option<Vec<String>>,
}

impl UpstreamRequest {
    /// Build the upstream body from an envelope with the fixed generation parameters
    pub fn from_envelope(envelope: ChatEnvelope, default_model: &str) -> Self {
        Self {
            model: envelope.model_or(default_model),
            messages: envelope.messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
            stop: None,
        }
    }
}
