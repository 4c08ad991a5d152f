//! Request parameters and response types for the CoinPayments API.
//!
//! Each params struct converts into a [`CoinpaymentsRequest`](crate::request::CoinpaymentsRequest)
//! via `From`, so it can be passed straight to `CoinpaymentsClient::call`.

pub mod account;
pub mod serde_util;
pub mod transaction;
pub mod withdrawal;

// Re-export all types for convenience
pub use account::*;
pub use transaction::*;
pub use withdrawal::*;
