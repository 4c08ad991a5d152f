//! Credentials, option normalization and request signing.
//!
//! Every call goes through two pure steps before hitting the network:
//!
//! 1. [`apply_default_options`] copies the caller's request and stamps the
//!    protocol `version`, response `format` and public `key` onto it.
//! 2. [`sign_request`] serializes the normalized request once and computes the
//!    hex HMAC-SHA512 of that exact string with the private key.
//!
//! The resulting [`SignedRequest`] owns both the body and the headers, so the
//! bytes that are signed are the bytes that are sent.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::config::ApiConfig;
use crate::error::{CoinpaymentsError, CoinpaymentsResult};
use crate::network::{FORM_CONTENT_TYPE, HMAC_HEADER};
use crate::request::CoinpaymentsRequest;

type HmacSha512 = Hmac<Sha512>;

/// Environment variable holding the public key.
pub const PUBLIC_KEY_ENV: &str = "COINPAYMENTS_PUBLIC_KEY";

/// Environment variable holding the private key.
pub const PRIVATE_KEY_ENV: &str = "COINPAYMENTS_PRIVATE_KEY";

/// API key pair plus an optional reusable HTTP client.
///
/// The secret is only ever read by the signer. `Debug` output redacts it.
#[derive(Clone)]
pub struct Credentials {
    key: String,
    secret: String,
    client: Option<reqwest::Client>,
}

impl Credentials {
    /// Create credentials from a public key and its private key.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            client: None,
        }
    }

    /// Read credentials from `COINPAYMENTS_PUBLIC_KEY` and `COINPAYMENTS_PRIVATE_KEY`.
    pub fn from_env() -> CoinpaymentsResult<Self> {
        let key = read_env(PUBLIC_KEY_ENV)?;
        let secret = read_env(PRIVATE_KEY_ENV)?;
        Ok(Self::new(key, secret))
    }

    /// Attach a client whose connection pool is reused for every request
    /// made with these credentials.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// The public key sent in the `key` field.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The caller-supplied connection handle, if any.
    pub fn client(&self) -> Option<&reqwest::Client> {
        self.client.as_ref()
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("client", &self.client.is_some())
            .finish()
    }
}

fn read_env(name: &str) -> CoinpaymentsResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(CoinpaymentsError::Validation(format!(
            "Environment variable {} is not set",
            name
        ))),
    }
}

/// Return a copy of `request` with `version`, `format` and `key` set.
///
/// The input is left untouched. Applying this to an already normalized
/// request yields the same request.
pub fn apply_default_options(
    credentials: &Credentials,
    request: &CoinpaymentsRequest,
    config: &ApiConfig,
) -> CoinpaymentsRequest {
    request
        .clone()
        .with("version", config.version.as_str())
        .with("format", config.format.as_str())
        .with("key", credentials.key())
}

/// Headers that authenticate one request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateHeaders {
    pub content_type: String,
    /// Hex HMAC-SHA512 of the body.
    pub hmac: String,
}

impl PrivateHeaders {
    /// Header name/value pairs in send order.
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [
            ("Content-Type", self.content_type.as_str()),
            (HMAC_HEADER, self.hmac.as_str()),
        ]
    }
}

/// A serialized body and the headers signed over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub body: String,
    pub headers: PrivateHeaders,
}

/// Hex HMAC-SHA512 of `payload` keyed by `secret`.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Headers for an already serialized body.
pub fn private_headers(credentials: &Credentials, body: &str) -> PrivateHeaders {
    PrivateHeaders {
        content_type: FORM_CONTENT_TYPE.to_string(),
        hmac: sign_payload(credentials.secret(), body.as_bytes()),
    }
}

/// Serialize a normalized request and sign the result.
pub fn sign_request(
    credentials: &Credentials,
    request: &CoinpaymentsRequest,
) -> CoinpaymentsResult<SignedRequest> {
    let body = request.to_form()?;
    let headers = private_headers(credentials, &body);
    Ok(SignedRequest { body, headers })
}
