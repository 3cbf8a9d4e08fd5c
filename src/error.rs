//! Relay Error Types
//!
//! Every failure the relay can report, and how each one is shown to the caller.

use crate::config::Flavor;
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Main error type for relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Non-POST request reached a standalone handler
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The key environment variable is not set
    #[error("{0} is not set")]
    MissingKeys(String),

    /// The key environment variable is set but holds no usable keys
    #[error("{0} contains no usable keys")]
    NoValidKeys(String),

    /// Upstream answered with a non-2xx status
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// Request body is not a usable JSON object
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Outbound request failed before a response arrived
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Configuration errors (unreadable file, bad override, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// HTTP status reported to the caller
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::Upstream { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `error` label for the given hosting flavor
    pub fn label(&self, flavor: Flavor) -> &'static str {
        match (self, flavor) {
            (RelayError::MethodNotAllowed, _) => "Method not allowed",
            (RelayError::MissingKeys(_), Flavor::Standalone) => {
                "Server Configuration Error: Missing Keys"
            }
            (RelayError::MissingKeys(_), Flavor::Routed) => "No GROQ_API_KEYS in env",
            (RelayError::NoValidKeys(_), Flavor::Standalone) => {
                "Server Configuration Error: No Valid Keys"
            }
            (RelayError::NoValidKeys(_), Flavor::Routed) => "No Valid GROQ_API_KEYS configured",
            (RelayError::Upstream { .. }, Flavor::Standalone) => "Groq Provider Error",
            (RelayError::Upstream { .. }, Flavor::Routed) => "Groq error",
            (_, Flavor::Standalone) => "Internal Server Error",
            (_, Flavor::Routed) => "Server crash",
        }
    }

    /// The `detail` field, when the error carries one
    pub fn detail(&self) -> Option<String> {
        match self {
            RelayError::MethodNotAllowed
            | RelayError::MissingKeys(_)
            | RelayError::NoValidKeys(_) => None,
            RelayError::Upstream { body, .. } => Some(body.clone()),
            other => Some(other.to_string()),
        }
    }

    /// JSON body sent to the caller
    pub fn to_body(&self, flavor: Flavor) -> ErrorBody {
        ErrorBody {
            error: self.label(flavor),
            detail: self.detail(),
        }
    }
}

/// Caller-facing error payload
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::InvalidBody(err.to_string())
    }
}

impl From<std::io::Error> for RelayError {
    fn from(err: std::io::Error) -> Self {
        RelayError::Config(format!("IO error: {}", err))
    }
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
