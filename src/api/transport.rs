//! Transport layer: one POST per call, full body accumulated before parsing.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method};

use crate::auth::PrivateHeaders;
use crate::error::CoinpaymentsResult;

/// Target and headers for one signed request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub url: String,
    pub headers: PrivateHeaders,
    /// Caller's reusable client; takes precedence over the transport's own.
    pub client: Option<Client>,
}

impl RequestOptions {
    pub fn new(url: impl Into<String>, headers: PrivateHeaders) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers,
            client: None,
        }
    }
}

/// Sends a signed body and returns the complete response text.
///
/// Implementations must send `body` unchanged and must not retry. Network
/// faults come back as [`CoinpaymentsError::Transport`](crate::error::CoinpaymentsError::Transport).
pub trait Transport: Send + Sync {
    fn send(
        &self,
        options: &RequestOptions,
        body: &str,
    ) -> impl Future<Output = CoinpaymentsResult<String>> + Send;
}

/// reqwest-backed transport.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Build a transport with its own connection pool.
    ///
    /// `timeout` bounds the whole exchange; `None` leaves it unbounded.
    pub fn new(timeout: Option<Duration>) -> CoinpaymentsResult<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            timeout,
        })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Bound each exchange, whichever client sends it.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Transport for HttpTransport {
    async fn send(&self, options: &RequestOptions, body: &str) -> CoinpaymentsResult<String> {
        let client = options.client.as_ref().unwrap_or(&self.client);

        let mut request = client.request(options.method.clone(), options.url.as_str());
        for (name, value) in options.headers.pairs() {
            request = request.header(name, value);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let mut response = request.body(body.to_owned()).send().await?;
        let status = response.status();

        let mut buf = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            buf.extend_from_slice(&chunk);
        }

        tracing::debug!(
            status = %status,
            bytes = buf.len(),
            url = %options.url,
            "Response received"
        );

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
