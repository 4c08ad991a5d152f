//! Request validation run before anything is signed or sent.

use crate::error::{CoinpaymentsError, CoinpaymentsResult};
use crate::request::{CoinpaymentsRequest, CMD_FIELD};

/// Accepts or rejects a request before any network effect.
pub trait Validator: Send + Sync {
    fn validate(&self, request: &CoinpaymentsRequest) -> CoinpaymentsResult<()>;
}

impl<F> Validator for F
where
    F: Fn(&CoinpaymentsRequest) -> CoinpaymentsResult<()> + Send + Sync,
{
    fn validate(&self, request: &CoinpaymentsRequest) -> CoinpaymentsResult<()> {
        self(request)
    }
}

/// Required fields per known command.
const REQUIRED_FIELDS: &[(&str, &[&str])] = &[
    ("get_basic_info", &[]),
    ("rates", &[]),
    ("balances", &[]),
    ("get_deposit_address", &["currency"]),
    ("get_callback_address", &["currency"]),
    (
        "create_transaction",
        &["amount", "currency1", "currency2", "buyer_email"],
    ),
    ("get_tx_info", &["txid"]),
    ("get_tx_info_multi", &["txid"]),
    ("get_tx_ids", &[]),
    ("create_transfer", &["amount", "currency"]),
    ("create_withdrawal", &["amount", "currency"]),
    ("create_mass_withdrawal", &[]),
    ("cancel_withdrawal", &["id"]),
    ("get_withdrawal_info", &["id"]),
    ("get_withdrawal_history", &[]),
    ("convert", &["amount", "from", "to"]),
    ("convert_limits", &["from", "to"]),
    ("get_conversion_info", &["id"]),
];

/// Commands that need at least one of several destination fields.
const ONE_OF_FIELDS: &[(&str, &[&str])] = &[
    ("create_transfer", &["merchant", "pbntag"]),
    ("create_withdrawal", &["address", "pbntag", "domain"]),
];

/// Default validator: checks `cmd` and the required fields of known commands.
///
/// Unknown commands only get the `cmd` checks, so new API commands can be
/// called without a crate release.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadValidator;

impl PayloadValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for PayloadValidator {
    fn validate(&self, request: &CoinpaymentsRequest) -> CoinpaymentsResult<()> {
        let cmd = validate_cmd(request)?;

        if let Some((_, required)) = REQUIRED_FIELDS.iter().find(|(name, _)| *name == cmd) {
            for field in required.iter() {
                if !has_value(request, field) {
                    return Err(CoinpaymentsError::Validation(format!(
                        "{} requires field '{}'",
                        cmd, field
                    )));
                }
            }
        }

        if let Some((_, fields)) = ONE_OF_FIELDS.iter().find(|(name, _)| *name == cmd) {
            if !fields.iter().any(|field| has_value(request, field)) {
                return Err(CoinpaymentsError::Validation(format!(
                    "{} requires one of: {}",
                    cmd,
                    fields.join(", ")
                )));
            }
        }

        Ok(())
    }
}

fn validate_cmd(request: &CoinpaymentsRequest) -> CoinpaymentsResult<&str> {
    let value = request.get(CMD_FIELD).ok_or_else(|| {
        CoinpaymentsError::Validation("Missing required field 'cmd'".to_string())
    })?;
    let cmd = value
        .as_str()
        .ok_or_else(|| CoinpaymentsError::Validation("Field 'cmd' must be a string".to_string()))?;

    if cmd.is_empty() {
        return Err(CoinpaymentsError::Validation(
            "Field 'cmd' cannot be empty".to_string(),
        ));
    }
    if !cmd
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
    {
        return Err(CoinpaymentsError::Validation(format!(
            "Invalid command name '{}'",
            cmd
        )));
    }
    Ok(cmd)
}

fn has_value(request: &CoinpaymentsRequest, field: &str) -> bool {
    request.get(field).is_some_and(|v| !v.is_empty())
}
