//! Network and protocol constants for the CoinPayments API.

/// Default API endpoint (protocol + host + path). Every command is a POST here.
pub const DEFAULT_API_URL: &str = "https://www.coinpayments.net/api.php";

/// API version sent in the `version` field of every request.
pub const API_VERSION: &str = "1";

/// Response format sent in the `format` field of every request.
pub const API_FORMAT: &str = "json";

/// Value of the envelope's `error` field that marks a successful call.
pub const API_VALID_RESPONSE: &str = "ok";

/// Header carrying the hex HMAC-SHA512 of the request body.
pub const HMAC_HEADER: &str = "HMAC";

/// Content type of every request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
