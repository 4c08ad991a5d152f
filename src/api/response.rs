//! Response envelope interpretation.
//!
//! Every response body is a JSON object of the form
//! `{ "error": string, "result"?: any }`. The call succeeded iff `error` equals
//! the configured success sentinel; otherwise `result` is ignored.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CoinpaymentsError, CoinpaymentsResult, INVALID_RESPONSE};

/// Map accumulated response text to the envelope's `result` or an error.
///
/// A success envelope without `result` yields `Value::Null`.
pub fn parse_envelope(text: &str, success_sentinel: &str) -> CoinpaymentsResult<Value> {
    let mut envelope: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(bytes = text.len(), "Response body is not valid JSON");
            return Err(CoinpaymentsError::InvalidResponse {
                body: text.to_string(),
            });
        }
    };

    let failure = match envelope.get("error") {
        Some(Value::String(error)) if error == success_sentinel => None,
        Some(Value::String(error)) => Some(error.clone()),
        _ => Some(INVALID_RESPONSE.to_string()),
    };

    let Some(message) = failure else {
        let result = envelope
            .as_object_mut()
            .and_then(|fields| fields.remove("result"))
            .unwrap_or(Value::Null);
        return Ok(result);
    };

    tracing::warn!(error = %message, "API returned an error");
    Err(CoinpaymentsError::Api { message, envelope })
}

/// Deserialize a successful `result` into the caller's type.
pub fn decode_result<T: DeserializeOwned>(result: Value) -> CoinpaymentsResult<T> {
    serde_json::from_value(result.clone()).map_err(|e| CoinpaymentsError::Deserialize {
        message: format!("Failed to deserialize result: {}", e),
        result,
    })
}
