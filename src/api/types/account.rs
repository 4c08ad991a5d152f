//! Account-level types: basic info, exchange rates and balances.

use serde::{Deserialize, Serialize};

use super::serde_util::{opt_string_or_number, string_or_number};
use crate::request::CoinpaymentsRequest;

/// Result of `get_basic_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicInfo {
    pub username: String,
    pub merchant_id: String,
    pub email: String,
    pub public_name: String,
    /// Account creation time (Unix seconds)
    pub time_joined: i64,
    #[serde(default)]
    pub kyc_status: Option<bool>,
    #[serde(default)]
    pub swych_tos_accepted: Option<bool>,
}

/// Parameters for `rates`.
#[derive(Debug, Clone, Default)]
pub struct RatesParams {
    /// Omit names, confirms and fees from the result
    pub short: bool,
    /// Only coins the merchant accepts
    pub accepted: bool,
}

impl RatesParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn short(mut self) -> Self {
        self.short = true;
        self
    }

    pub fn accepted_only(mut self) -> Self {
        self.accepted = true;
        self
    }
}

impl From<RatesParams> for CoinpaymentsRequest {
    fn from(params: RatesParams) -> Self {
        CoinpaymentsRequest::new("rates")
            .with_flag("short", params.short)
            .with_flag("accepted", params.accepted)
    }
}

/// One coin's entry in the `rates` result, keyed by ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateInfo {
    /// 1 for fiat currencies
    pub is_fiat: u8,
    /// Rate in BTC as decimal string
    pub rate_btc: String,
    /// Last update time (Unix seconds)
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub last_update: String,
    #[serde(default, deserialize_with = "opt_string_or_number::deserialize")]
    pub tx_fee: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number::deserialize")]
    pub confirms: Option<String>,
    #[serde(default)]
    pub can_convert: Option<u8>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub accepted: Option<u8>,
}

impl RateInfo {
    pub fn is_fiat(&self) -> bool {
        self.is_fiat == 1
    }
}

/// Parameters for `balances`.
#[derive(Debug, Clone, Default)]
pub struct BalancesParams {
    /// Include coins with a zero balance
    pub all: bool,
}

impl BalancesParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_empty(mut self) -> Self {
        self.all = true;
        self
    }
}

impl From<BalancesParams> for CoinpaymentsRequest {
    fn from(params: BalancesParams) -> Self {
        CoinpaymentsRequest::new("balances").with_flag("all", params.all)
    }
}

/// One coin's entry in the `balances` result, keyed by ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinBalance {
    /// Balance in the coin's smallest unit
    pub balance: i64,
    /// Balance as decimal string
    pub balancef: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub coin_status: Option<String>,
}
