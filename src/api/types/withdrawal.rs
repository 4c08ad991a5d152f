//! Outgoing funds: withdrawals and merchant-to-merchant transfers.

use serde::{Deserialize, Serialize};

use super::serde_util::{opt_string_or_number, string_or_number};
use crate::request::CoinpaymentsRequest;

/// Parameters for `create_withdrawal`.
///
/// Exactly one destination (`address`, `pbntag` or `domain`) should be set.
#[derive(Debug, Clone, Default)]
pub struct CreateWithdrawalParams {
    /// Amount as decimal string
    pub amount: String,
    /// Coin to withdraw
    pub currency: String,
    /// Denominate `amount` in this currency instead
    pub currency2: Option<String>,
    pub address: Option<String>,
    pub pbntag: Option<String>,
    pub domain: Option<String>,
    pub dest_tag: Option<String>,
    pub ipn_url: Option<String>,
    /// Skip the email confirmation step
    pub auto_confirm: bool,
    pub note: Option<String>,
}

impl CreateWithdrawalParams {
    /// Withdraw to an on-chain address.
    pub fn to_address(
        amount: impl Into<String>,
        currency: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            address: Some(address.into()),
            ..Default::default()
        }
    }

    /// Withdraw to a $PayByName tag.
    pub fn to_pbntag(
        amount: impl Into<String>,
        currency: impl Into<String>,
        pbntag: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            pbntag: Some(pbntag.into()),
            ..Default::default()
        }
    }

    pub fn with_currency2(mut self, currency2: impl Into<String>) -> Self {
        self.currency2 = Some(currency2.into());
        self
    }

    pub fn with_dest_tag(mut self, tag: impl Into<String>) -> Self {
        self.dest_tag = Some(tag.into());
        self
    }

    pub fn with_ipn_url(mut self, url: impl Into<String>) -> Self {
        self.ipn_url = Some(url.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn auto_confirm(mut self) -> Self {
        self.auto_confirm = true;
        self
    }
}

impl From<CreateWithdrawalParams> for CoinpaymentsRequest {
    fn from(params: CreateWithdrawalParams) -> Self {
        CoinpaymentsRequest::new("create_withdrawal")
            .with("amount", params.amount)
            .with("currency", params.currency)
            .with_opt("currency2", params.currency2)
            .with_opt("address", params.address)
            .with_opt("pbntag", params.pbntag)
            .with_opt("domain", params.domain)
            .with_opt("dest_tag", params.dest_tag)
            .with_opt("ipn_url", params.ipn_url)
            .with_flag("auto_confirm", params.auto_confirm)
            .with_opt("note", params.note)
    }
}

/// Result of `create_withdrawal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedWithdrawal {
    pub id: String,
    /// 0: awaiting email confirmation, 1: queued
    pub status: i32,
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub amount: String,
}

/// Result of `get_withdrawal_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalInfo {
    pub time_created: i64,
    /// -1: cancelled, 0: waiting for confirmation, 1: pending, 2: complete
    pub status: i32,
    pub status_text: String,
    pub coin: String,
    pub amount: i64,
    pub amountf: String,
    pub send_address: String,
    #[serde(default, deserialize_with = "opt_string_or_number::deserialize")]
    pub send_dest_tag: Option<String>,
    /// Empty until the withdrawal is broadcast
    #[serde(default)]
    pub send_txid: Option<String>,
}

impl WithdrawalInfo {
    pub fn is_complete(&self) -> bool {
        self.status == 2
    }
}

/// Parameters for `create_transfer`.
#[derive(Debug, Clone, Default)]
pub struct CreateTransferParams {
    pub amount: String,
    pub currency: String,
    /// Receiving merchant ID
    pub merchant: Option<String>,
    pub pbntag: Option<String>,
    pub auto_confirm: bool,
    pub note: Option<String>,
}

impl CreateTransferParams {
    pub fn to_merchant(
        amount: impl Into<String>,
        currency: impl Into<String>,
        merchant: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            merchant: Some(merchant.into()),
            ..Default::default()
        }
    }

    pub fn to_pbntag(
        amount: impl Into<String>,
        currency: impl Into<String>,
        pbntag: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            pbntag: Some(pbntag.into()),
            ..Default::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn auto_confirm(mut self) -> Self {
        self.auto_confirm = true;
        self
    }
}

impl From<CreateTransferParams> for CoinpaymentsRequest {
    fn from(params: CreateTransferParams) -> Self {
        CoinpaymentsRequest::new("create_transfer")
            .with("amount", params.amount)
            .with("currency", params.currency)
            .with_opt("merchant", params.merchant)
            .with_opt("pbntag", params.pbntag)
            .with_flag("auto_confirm", params.auto_confirm)
            .with_opt("note", params.note)
    }
}

/// Result of `create_transfer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTransfer {
    pub id: String,
    /// 0: awaiting email confirmation, 1: queued
    pub status: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{PayloadValidator, Validator};

    #[test]
    fn test_withdrawal_request() {
        let request: CoinpaymentsRequest =
            CreateWithdrawalParams::to_address("0.5", "LTC", "LYmpMv8y1e7vvTsq8YmY5hr8kqDbJ6iRru")
                .auto_confirm()
                .into();
        assert_eq!(
            request.to_form().unwrap(),
            "cmd=create_withdrawal&amount=0.5&currency=LTC\
             &address=LYmpMv8y1e7vvTsq8YmY5hr8kqDbJ6iRru&auto_confirm=1"
        );
        assert!(PayloadValidator.validate(&request).is_ok());
    }

    #[test]
    fn test_withdrawal_request_omits_unset_flag() {
        let request: CoinpaymentsRequest =
            CreateWithdrawalParams::to_address("0.5", "LTC", "Laddr").into();
        assert_eq!(
            request.to_form().unwrap(),
            "cmd=create_withdrawal&amount=0.5&currency=LTC&address=Laddr"
        );
        assert!(!request.contains_key("auto_confirm"));
    }

    #[test]
    fn test_transfer_request_passes_validation() {
        let request: CoinpaymentsRequest =
            CreateTransferParams::to_pbntag("1", "BTC", "$friend").into();
        assert!(PayloadValidator.validate(&request).is_ok());
    }

    #[test]
    fn test_withdrawal_info_deserialize() {
        let json = r#"{
            "time_created": 1700000000,
            "status": 2,
            "status_text": "Complete",
            "coin": "LTC",
            "amount": 50000000,
            "amountf": "0.50000000",
            "send_address": "LYmpMv8y1e7vvTsq8YmY5hr8kqDbJ6iRru",
            "send_txid": "9f0c..."
        }"#;
        let info: WithdrawalInfo = serde_json::from_str(json).unwrap();
        assert!(info.is_complete());
        assert!(info.send_dest_tag.is_none());
    }

    #[test]
    fn test_created_withdrawal_numeric_amount() {
        let w: CreatedWithdrawal =
            serde_json::from_str(r#"{"id":"CWAB12","status":1,"amount":0.5}"#).unwrap();
        assert_eq!(w.amount, "0.5");
    }
}
