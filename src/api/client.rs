//! CoinPayments API client implementation.
//!
//! [`CoinpaymentsClient`] runs every command through the same pipeline:
//! validate, normalize, sign, send, interpret.
//!
//! # Example
//!
//! ```rust,ignore
//! use coinpayments::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinpaymentsClient::new(Credentials::from_env()?)?;
//!
//!     let rates = client.rates(RatesParams::new().accepted_only()).await?;
//!     println!("{} accepted coins", rates.len());
//!
//!     let tx = client
//!         .create_transaction(CreateTransactionParams::new("10.00", "USD", "BTC", "buyer@example.com"))
//!         .await?;
//!     println!("Pay {} BTC to {}", tx.amount, tx.address);
//!
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::response::{decode_result, parse_envelope};
use crate::api::transport::{HttpTransport, RequestOptions, Transport};
use crate::api::types::*;
use crate::auth::{apply_default_options, sign_request, Credentials};
use crate::config::ApiConfig;
use crate::error::{CoinpaymentsError, CoinpaymentsResult};
use crate::request::CoinpaymentsRequest;
use crate::validation::{PayloadValidator, Validator};

/// Builder for configuring [`CoinpaymentsClient`].
pub struct CoinpaymentsClientBuilder {
    credentials: Credentials,
    config: ApiConfig,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
    validator: Arc<dyn Validator>,
}

impl CoinpaymentsClientBuilder {
    /// Create a new builder for the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            config: ApiConfig::default(),
            timeout: None,
            http_client: None,
            validator: Arc::new(PayloadValidator),
        }
    }

    /// Override the API endpoint. Trailing slashes are trimmed.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the `version` field sent with every request.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Override the `format` field sent with every request.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.config.format = format.into();
        self
    }

    /// Override the envelope `error` value that marks success.
    pub fn success_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.config.success_sentinel = sentinel.into();
        self
    }

    /// Bound each exchange. Without this the client never times out.
    ///
    /// Applied per request, so it also holds with [`http_client`](Self::http_client)
    /// or a reused connection handle on the credentials.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use an existing reqwest client for the default transport.
    ///
    /// Ignored by [`build_with_transport`](Self::build_with_transport).
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replace the default [`PayloadValidator`].
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Build a client on the default HTTP transport.
    pub fn build(self) -> CoinpaymentsResult<CoinpaymentsClient> {
        let transport = match self.http_client.clone() {
            Some(client) => HttpTransport::with_client(client).with_timeout(self.timeout),
            None => HttpTransport::new(self.timeout)?,
        };
        self.build_with_transport(transport)
    }

    /// Build a client on a custom transport.
    pub fn build_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> CoinpaymentsResult<CoinpaymentsClient<T>> {
        if self.config.api_url.is_empty() {
            return Err(CoinpaymentsError::InvalidParameter(
                "API URL cannot be empty".to_string(),
            ));
        }
        if self.credentials.key().is_empty() {
            return Err(CoinpaymentsError::InvalidParameter(
                "Public key cannot be empty".to_string(),
            ));
        }

        Ok(CoinpaymentsClient {
            credentials: self.credentials,
            config: self.config,
            validator: self.validator,
            transport,
        })
    }
}

/// CoinPayments API client.
///
/// Holds read-only credentials and configuration; concurrent calls share no
/// mutable state.
#[derive(Clone)]
pub struct CoinpaymentsClient<T = HttpTransport> {
    credentials: Credentials,
    config: ApiConfig,
    validator: Arc<dyn Validator>,
    transport: T,
}

impl CoinpaymentsClient {
    /// Create a client with default settings (no timeout, default endpoint).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(credentials: Credentials) -> CoinpaymentsResult<Self> {
        CoinpaymentsClientBuilder::new(credentials).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(credentials: Credentials) -> CoinpaymentsClientBuilder {
        CoinpaymentsClientBuilder::new(credentials)
    }
}

impl<T: Transport> CoinpaymentsClient<T> {
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // =========================================================================
    // Call pipeline
    // =========================================================================

    /// Run a command and deserialize its `result`.
    pub async fn call<R: DeserializeOwned>(
        &self,
        request: &CoinpaymentsRequest,
    ) -> CoinpaymentsResult<R> {
        let result = self.call_raw(request).await?;
        decode_result(result)
    }

    /// Run a command and hand the outcome to `callback` exactly once.
    ///
    /// Returns whatever the callback returns.
    pub async fn call_with_callback<R, F, O>(&self, request: &CoinpaymentsRequest, callback: F) -> O
    where
        R: DeserializeOwned,
        F: FnOnce(CoinpaymentsResult<R>) -> O,
    {
        callback(self.call(request).await)
    }

    /// Run a command and return its `result` as untyped JSON.
    pub async fn call_raw(&self, request: &CoinpaymentsRequest) -> CoinpaymentsResult<Value> {
        self.validator.validate(request)?;

        let normalized = apply_default_options(&self.credentials, request, &self.config);
        let signed = sign_request(&self.credentials, &normalized)?;

        let mut options = RequestOptions::new(self.config.api_url.as_str(), signed.headers);
        if let Some(client) = self.credentials.client() {
            options.client = Some(client.clone());
        }

        tracing::debug!(
            cmd = request.cmd().unwrap_or_default(),
            url = %options.url,
            body_len = signed.body.len(),
            "Sending request"
        );

        let text = self.transport.send(&options, &signed.body).await?;
        parse_envelope(&text, &self.config.success_sentinel)
    }

    // =========================================================================
    // Account endpoints
    // =========================================================================

    /// Get merchant account information.
    pub async fn get_basic_info(&self) -> CoinpaymentsResult<BasicInfo> {
        self.call(&CoinpaymentsRequest::new("get_basic_info")).await
    }

    /// Get exchange rates keyed by coin ticker.
    pub async fn rates(&self, params: RatesParams) -> CoinpaymentsResult<HashMap<String, RateInfo>> {
        self.call(&params.into()).await
    }

    /// Get coin balances keyed by coin ticker.
    pub async fn balances(
        &self,
        params: BalancesParams,
    ) -> CoinpaymentsResult<HashMap<String, CoinBalance>> {
        self.call(&params.into()).await
    }

    // =========================================================================
    // Receiving payments
    // =========================================================================

    /// Get an address whose deposits trigger IPN callbacks.
    pub async fn get_callback_address(
        &self,
        params: CallbackAddressParams,
    ) -> CoinpaymentsResult<CallbackAddress> {
        self.call(&params.into()).await
    }

    /// Create a checkout transaction.
    pub async fn create_transaction(
        &self,
        params: CreateTransactionParams,
    ) -> CoinpaymentsResult<CreatedTransaction> {
        self.call(&params.into()).await
    }

    /// Get the status of a transaction. `full` adds checkout details.
    pub async fn get_tx_info(&self, txid: &str, full: bool) -> CoinpaymentsResult<TransactionInfo> {
        let request = CoinpaymentsRequest::new("get_tx_info")
            .with("txid", txid)
            .with_flag("full", full);
        self.call(&request).await
    }

    /// List transaction IDs, newest first.
    pub async fn get_tx_ids(&self, params: TxIdsParams) -> CoinpaymentsResult<Vec<String>> {
        self.call(&params.into()).await
    }

    // =========================================================================
    // Sending funds
    // =========================================================================

    /// Withdraw coins to an address or $PayByName tag.
    pub async fn create_withdrawal(
        &self,
        params: CreateWithdrawalParams,
    ) -> CoinpaymentsResult<CreatedWithdrawal> {
        self.call(&params.into()).await
    }

    /// Get the status of a withdrawal.
    pub async fn get_withdrawal_info(&self, id: &str) -> CoinpaymentsResult<WithdrawalInfo> {
        let request = CoinpaymentsRequest::new("get_withdrawal_info").with("id", id);
        self.call(&request).await
    }

    /// Transfer coins to another merchant.
    pub async fn create_transfer(
        &self,
        params: CreateTransferParams,
    ) -> CoinpaymentsResult<CreatedTransfer> {
        self.call(&params.into()).await
    }
}
