//! Protocol configuration shared by the normalizer, the client and the
//! response parser.

use crate::network::{API_FORMAT, API_VALID_RESPONSE, API_VERSION, DEFAULT_API_URL};

/// Fixed protocol values for one client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Endpoint every command is POSTed to.
    pub api_url: String,
    /// Value of the `version` request field.
    pub version: String,
    /// Value of the `format` request field.
    pub format: String,
    /// Envelope `error` value that marks success.
    pub success_sentinel: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            version: API_VERSION.to_string(),
            format: API_FORMAT.to_string(),
            success_sentinel: API_VALID_RESPONSE.to_string(),
        }
    }
}
