//! Error types for the CoinPayments client.

use thiserror::Error;

/// Message used when the response body is not a well-formed envelope.
pub const INVALID_RESPONSE: &str = "Invalid response";

/// Top-level SDK error.
///
/// Every failure reaches the caller exactly once, unchanged. Nothing in the
/// crate retries.
#[derive(Debug, Error)]
pub enum CoinpaymentsError {
    /// The request was rejected before any network effect.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network or TLS fault from the connection layer, passed through verbatim.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The body was received but is not JSON.
    #[error("Invalid response")]
    InvalidResponse {
        /// Raw accumulated response text
        body: String,
    },

    /// The envelope's `error` field is not the success sentinel.
    #[error("{message}")]
    Api {
        /// Value of the envelope's `error` field
        message: String,
        /// The full parsed envelope
        envelope: serde_json::Value,
    },

    /// The call succeeded but `result` does not have the requested shape.
    #[error("Deserialization error: {message}")]
    Deserialize {
        message: String,
        result: serde_json::Value,
    },

    /// Invalid configuration or builder input.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Diagnostic payload attached to a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorContext {
    /// Raw response text that could not be parsed.
    Raw(String),
    /// Parsed response envelope (or a `result` that failed to deserialize).
    Envelope(serde_json::Value),
}

impl CoinpaymentsError {
    /// Human-readable message, without any variant prefix for response errors.
    ///
    /// For [`CoinpaymentsError::Api`] this is exactly the server's `error` value.
    pub fn message(&self) -> String {
        match self {
            CoinpaymentsError::Validation(msg) => msg.clone(),
            CoinpaymentsError::Transport(e) => e.to_string(),
            CoinpaymentsError::InvalidResponse { .. } => INVALID_RESPONSE.to_string(),
            CoinpaymentsError::Api { message, .. } => message.clone(),
            CoinpaymentsError::Deserialize { message, .. } => message.clone(),
            CoinpaymentsError::InvalidParameter(msg) => msg.clone(),
        }
    }

    /// Optional context payload: raw body or parsed envelope.
    pub fn context(&self) -> Option<ErrorContext> {
        match self {
            CoinpaymentsError::InvalidResponse { body } => Some(ErrorContext::Raw(body.clone())),
            CoinpaymentsError::Api { envelope, .. } => {
                Some(ErrorContext::Envelope(envelope.clone()))
            }
            CoinpaymentsError::Deserialize { result, .. } => {
                Some(ErrorContext::Envelope(result.clone()))
            }
            _ => None,
        }
    }

    /// Whether the server answered with an application-level error.
    pub fn is_api_error(&self) -> bool {
        matches!(self, CoinpaymentsError::Api { .. })
    }

    /// Whether the request never left the process.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, CoinpaymentsError::Validation(_))
    }
}

/// Result type alias for SDK operations.
pub type CoinpaymentsResult<T> = Result<T, CoinpaymentsError>;
