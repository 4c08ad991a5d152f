//! REST client for the CoinPayments API.
//!
//! Every command is a form-encoded POST to a single endpoint, authenticated by
//! an HMAC-SHA512 signature of the body. Responses are JSON envelopes:
//! `{"error": "ok", "result": ...}` on success, any other `error` value on
//! failure.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use coinpayments::api::CoinpaymentsClient;
//! use coinpayments::auth::Credentials;
//!
//! let client = CoinpaymentsClient::new(Credentials::new("public", "private"))?;
//! let info = client.get_basic_info().await?;
//! println!("Merchant ID: {}", info.merchant_id);
//! ```
//!
//! # Arbitrary commands
//!
//! Commands without a typed wrapper go through [`CoinpaymentsClient::call`]:
//!
//! ```rust,ignore
//! use coinpayments::request::CoinpaymentsRequest;
//!
//! let request = CoinpaymentsRequest::new("get_pbn_info").with("pbntag", "$shop");
//! let info: serde_json::Value = client.call(&request).await?;
//! ```
//!
//! # Callbacks
//!
//! [`CoinpaymentsClient::call_with_callback`] delivers the same outcome to a
//! closure instead of returning it:
//!
//! ```rust,ignore
//! let summary = client
//!     .call_with_callback(&request, |outcome: CoinpaymentsResult<serde_json::Value>| {
//!         match outcome {
//!             Ok(result) => format!("ok: {}", result),
//!             Err(e) => format!("failed: {}", e),
//!         }
//!     })
//!     .await;
//! ```
//!
//! # Error Handling
//!
//! ```rust,ignore
//! use coinpayments::error::CoinpaymentsError;
//!
//! match client.get_tx_info("CPXXXX", false).await {
//!     Ok(tx) => println!("status: {}", tx.status_text),
//!     Err(CoinpaymentsError::Api { message, .. }) => println!("rejected: {}", message),
//!     Err(e) => println!("other error: {}", e),
//! }
//! ```

pub mod client;
pub mod response;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{CoinpaymentsClient, CoinpaymentsClientBuilder};
pub use response::{decode_result, parse_envelope};
pub use transport::{HttpTransport, RequestOptions, Transport};
pub use types::*;
