//! # CoinPayments Rust SDK
//!
//! A Rust client for the CoinPayments merchant API.
//!
//! ## Modules
//!
//! - [`api`]: REST client, transport and typed command wrappers
//! - [`auth`]: Credentials, option normalization and HMAC signing
//! - [`request`]: Request field bag and its urlencoded form
//! - [`validation`]: Pre-flight request validation
//! - [`error`]: Error taxonomy
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinpayments::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinpaymentsClient::new(Credentials::new("public", "private"))?;
//!
//!     let balances = client.balances(BalancesParams::new()).await?;
//!     for (coin, balance) in &balances {
//!         println!("{}: {}", coin, balance.balancef);
//!     }
//!
//!     Ok(())
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// REST API client, transport and typed responses.
pub mod api;

/// Credentials, option normalization and request signing.
pub mod auth;

/// Protocol configuration.
pub mod config;

/// Error types.
pub mod error;

/// Endpoint and protocol constants.
pub mod network;

/// Request field bag and canonical serialization.
pub mod request;

/// Request validation.
pub mod validation;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use coinpayments::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        CoinpaymentsClient, CoinpaymentsClientBuilder, HttpTransport, RequestOptions, Transport,
        // Params
        BalancesParams, CallbackAddressParams, CreateTransactionParams, CreateTransferParams,
        CreateWithdrawalParams, RatesParams, TxIdsParams,
        // Results
        BasicInfo, CallbackAddress, CoinBalance, CreatedTransaction, CreatedTransfer,
        CreatedWithdrawal, RateInfo, TransactionInfo, WithdrawalInfo,
    };

    pub use crate::auth::{Credentials, PrivateHeaders, SignedRequest};
    pub use crate::config::ApiConfig;
    pub use crate::error::{CoinpaymentsError, CoinpaymentsResult, ErrorContext};
    pub use crate::network::{API_FORMAT, API_VALID_RESPONSE, API_VERSION, DEFAULT_API_URL};
    pub use crate::request::{CoinpaymentsRequest, FieldValue};
    pub use crate::validation::{PayloadValidator, Validator};
}
