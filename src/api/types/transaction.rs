//! Payment types: receiving addresses, transactions and their status.

use serde::{Deserialize, Serialize};

use super::serde_util::{opt_string_or_number, string_or_number};
use crate::request::CoinpaymentsRequest;

/// Parameters for `get_callback_address`.
#[derive(Debug, Clone, Default)]
pub struct CallbackAddressParams {
    /// Coin ticker (required)
    pub currency: String,
    pub ipn_url: Option<String>,
    pub label: Option<String>,
    /// Return ERC20 addresses in EIP-55 format
    pub eip55: bool,
}

impl CallbackAddressParams {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            ..Default::default()
        }
    }

    pub fn with_ipn_url(mut self, url: impl Into<String>) -> Self {
        self.ipn_url = Some(url.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_eip55(mut self) -> Self {
        self.eip55 = true;
        self
    }
}

impl From<CallbackAddressParams> for CoinpaymentsRequest {
    fn from(params: CallbackAddressParams) -> Self {
        CoinpaymentsRequest::new("get_callback_address")
            .with("currency", params.currency)
            .with_opt("ipn_url", params.ipn_url)
            .with_opt("label", params.label)
            .with_flag("eip55", params.eip55)
    }
}

/// Result of `get_callback_address` and `get_deposit_address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackAddress {
    pub address: String,
    #[serde(default)]
    pub pubkey: Option<String>,
    /// Destination tag / memo for coins that need one
    #[serde(default, deserialize_with = "opt_string_or_number::deserialize")]
    pub dest_tag: Option<String>,
}

/// Parameters for `create_transaction`.
#[derive(Debug, Clone, Default)]
pub struct CreateTransactionParams {
    /// Amount in `currency1`, as decimal string
    pub amount: String,
    /// Currency the price is denominated in
    pub currency1: String,
    /// Currency the buyer pays with
    pub currency2: String,
    pub buyer_email: String,
    pub address: Option<String>,
    pub buyer_name: Option<String>,
    pub item_name: Option<String>,
    pub item_number: Option<String>,
    pub invoice: Option<String>,
    pub custom: Option<String>,
    pub ipn_url: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
}

impl CreateTransactionParams {
    pub fn new(
        amount: impl Into<String>,
        currency1: impl Into<String>,
        currency2: impl Into<String>,
        buyer_email: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency1: currency1.into(),
            currency2: currency2.into(),
            buyer_email: buyer_email.into(),
            ..Default::default()
        }
    }

    /// Send funds to this address instead of the merchant wallet.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_buyer_name(mut self, name: impl Into<String>) -> Self {
        self.buyer_name = Some(name.into());
        self
    }

    pub fn with_item(mut self, name: impl Into<String>, number: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self.item_number = Some(number.into());
        self
    }

    pub fn with_invoice(mut self, invoice: impl Into<String>) -> Self {
        self.invoice = Some(invoice.into());
        self
    }

    pub fn with_custom(mut self, custom: impl Into<String>) -> Self {
        self.custom = Some(custom.into());
        self
    }

    pub fn with_ipn_url(mut self, url: impl Into<String>) -> Self {
        self.ipn_url = Some(url.into());
        self
    }

    /// Set the buyer redirect URLs.
    pub fn with_redirects(
        mut self,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        self.success_url = Some(success_url.into());
        self.cancel_url = Some(cancel_url.into());
        self
    }
}

impl From<CreateTransactionParams> for CoinpaymentsRequest {
    fn from(params: CreateTransactionParams) -> Self {
        CoinpaymentsRequest::new("create_transaction")
            .with("amount", params.amount)
            .with("currency1", params.currency1)
            .with("currency2", params.currency2)
            .with("buyer_email", params.buyer_email)
            .with_opt("address", params.address)
            .with_opt("buyer_name", params.buyer_name)
            .with_opt("item_name", params.item_name)
            .with_opt("item_number", params.item_number)
            .with_opt("invoice", params.invoice)
            .with_opt("custom", params.custom)
            .with_opt("ipn_url", params.ipn_url)
            .with_opt("success_url", params.success_url)
            .with_opt("cancel_url", params.cancel_url)
    }
}

/// Result of `create_transaction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTransaction {
    /// Amount the buyer must send, in `currency2`
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub amount: String,
    pub address: String,
    #[serde(default, deserialize_with = "opt_string_or_number::deserialize")]
    pub dest_tag: Option<String>,
    pub txn_id: String,
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub confirms_needed: String,
    /// Seconds until the payment window closes
    pub timeout: u64,
    pub checkout_url: String,
    pub status_url: String,
    pub qrcode_url: String,
}

/// Result of `get_tx_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub time_created: i64,
    pub time_expires: i64,
    /// Below 0: failed or cancelled. 0–99: pending. 100 or 2: complete.
    pub status: i32,
    pub status_text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub coin: String,
    /// Expected amount in the coin's smallest unit
    pub amount: i64,
    pub amountf: String,
    pub received: i64,
    pub receivedf: String,
    pub recv_confirms: i64,
    pub payment_address: String,
    /// Checkout details, only present when requested with `full`
    #[serde(default)]
    pub checkout: Option<serde_json::Value>,
}

impl TransactionInfo {
    pub fn is_complete(&self) -> bool {
        self.status >= 100 || self.status == 2
    }

    pub fn is_failed(&self) -> bool {
        self.status < 0
    }

    pub fn is_pending(&self) -> bool {
        !self.is_complete() && !self.is_failed()
    }
}

/// Parameters for `get_tx_ids`.
#[derive(Debug, Clone, Default)]
pub struct TxIdsParams {
    /// Max results (1-100)
    pub limit: Option<u32>,
    /// Offset into the result set
    pub start: Option<u32>,
    /// Only transactions created at or after this Unix time
    pub newer: Option<i64>,
    /// Include transactions where the merchant is the buyer
    pub all: bool,
}

impl TxIdsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    pub fn newer_than(mut self, timestamp: i64) -> Self {
        self.newer = Some(timestamp);
        self
    }

    pub fn include_all(mut self) -> Self {
        self.all = true;
        self
    }
}

impl From<TxIdsParams> for CoinpaymentsRequest {
    fn from(params: TxIdsParams) -> Self {
        CoinpaymentsRequest::new("get_tx_ids")
            .with_opt("limit", params.limit)
            .with_opt("start", params.start)
            .with_opt("newer", params.newer)
            .with_flag("all", params.all)
    }
}
