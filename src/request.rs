//! Request field bag and its canonical urlencoded form.
//!
//! A [`CoinpaymentsRequest`] is an ordered mapping from field name to a small
//! closed set of scalar values. Every command carries a `cmd` field; the rest is
//! command specific. Field order is insertion order, and overwriting a field
//! keeps its original position, so serialization is deterministic.
//!
//! [`CoinpaymentsRequest::to_form`] is the only serializer in the crate. The
//! signer hashes its output and the transport sends that same string.

use std::fmt;

use crate::error::{CoinpaymentsError, CoinpaymentsResult};

/// Name of the mandatory command field.
pub const CMD_FIELD: &str = "cmd";

/// A single request field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl FieldValue {
    /// Borrow the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value is an empty string.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Str(s) if s.is_empty())
    }

    /// Text form of the value as it appears in the request body.
    ///
    /// Non-finite floats render as an empty string.
    pub fn to_form_value(&self) -> String {
        match self {
            FieldValue::Str(s) => s.clone(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) if f.is_finite() => f.to_string(),
            FieldValue::Float(_) => String::new(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_form_value())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Str(value.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Ordered request fields for a single API command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinpaymentsRequest {
    fields: Vec<(String, FieldValue)>,
}

impl CoinpaymentsRequest {
    /// Create a request for the given command.
    pub fn new(cmd: impl Into<String>) -> Self {
        let mut request = Self::default();
        request.set(CMD_FIELD, cmd.into());
        request
    }

    /// Build a request from arbitrary fields, which need not include `cmd`.
    ///
    /// Later duplicates overwrite earlier ones in place.
    pub fn from_fields<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut request = Self::default();
        for (key, value) in fields {
            request.set(key, value);
        }
        request
    }

    /// The command name, if `cmd` is present and a string.
    pub fn cmd(&self) -> Option<&str> {
        self.get(CMD_FIELD).and_then(FieldValue::as_str)
    }

    /// Insert or overwrite a field. An existing field keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field only when a value is given.
    pub fn with_opt<V: Into<FieldValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Set a `1` flag when `enabled` is true; the API reads flags as integers.
    pub fn with_flag(self, key: impl Into<String>, enabled: bool) -> Self {
        if enabled {
            self.with(key, 1i64)
        } else {
            self
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let index = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names and rendered values in serialization order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_form_value()))
            .collect()
    }

    /// Serialize to `key=value&key=value` with standard form encoding.
    ///
    /// This exact string is both signed and sent. Spaces encode as `+` and
    /// `!'()` are percent-encoded, unlike Node's `querystring.stringify`.
    pub fn to_form(&self) -> CoinpaymentsResult<String> {
        let pairs: Vec<(&str, String)> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_form_value()))
            .collect();
        serde_urlencoded::to_string(&pairs).map_err(|e| {
            CoinpaymentsError::InvalidParameter(format!("Failed to encode request: {}", e))
        })
    }

    /// Parse a urlencoded body back into a request. All values come back as strings.
    pub fn from_form(body: &str) -> CoinpaymentsResult<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body).map_err(|e| {
            CoinpaymentsError::InvalidParameter(format!("Failed to decode request: {}", e))
        })?;
        Ok(Self::from_fields(pairs))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for CoinpaymentsRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_fields(iter)
    }
}
