//! Error types for API calls.
//!
//! Two kinds cover every failure mode the tools care about: a
//! [`TransportError`] for anything that prevented a successful HTTP exchange
//! (connection failures, non-2xx statuses, undecodable bodies) and an
//! [`ApiError`] for rejections the service wraps in a 2xx response envelope.
//! There are no retries anywhere; callers decide whether to abort or carry
//! on.

use std::collections::BTreeMap;
use std::fmt;

use api_types::Messages;
use reqwest::StatusCode;
use serde_json::Value;

/// A failed HTTP exchange: connection error, non-2xx status or a body that
/// could not be decoded.
#[derive(Debug)]
pub struct TransportError {
    /// HTTP status, when a response was received.
    pub status: Option<StatusCode>,
    /// Raw response body, or a description of the failure.
    pub body: String,
}

impl TransportError {
    pub(crate) fn decode(err: &dyn fmt::Display) -> Self {
        Self { status: None, body: format!("undecodable response: {err}") }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {status}: {}", self.body),
            None => write!(f, "request failed: {}", self.body),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self { status: err.status(), body: err.to_string() }
    }
}

/// A structured application-level rejection embedded in a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Per-field validation errors, keyed by wire field name.
    pub fields: BTreeMap<String, Value>,
}

impl From<Messages> for ApiError {
    fn from(messages: Messages) -> Self {
        Self {
            code: messages.error_code.unwrap_or_default(),
            message: messages.error_message.unwrap_or_default(),
            fields: messages.error_fields.unwrap_or_default(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if !self.fields.is_empty() {
            write!(f, " Field errors:")?;
            for (field, detail) in &self.fields {
                write!(f, " {field}: {detail}")?;
            }
        }
        Ok(())
    }
}

/// Any failure returned by [`crate::UptimeClient`].
#[derive(Debug)]
pub enum Error {
    /// The HTTP exchange itself failed.
    Transport(TransportError),
    /// The service rejected the request inside a 2xx envelope.
    Api(ApiError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => err.fmt(f),
            Self::Api(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.into())
    }
}

impl Error {
    /// The HTTP status of a transport failure, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(err) => err.status,
            Self::Api(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn api_error_formats_field_errors() {
        let messages: Messages = serde_json::from_value(json!({
            "errors": true,
            "error_code": "VALIDATION_ERROR",
            "error_message": "Validation error.",
            "error_fields": { "msp_address": ["Enter a valid URL."] }
        }))
        .unwrap();
        let err = ApiError::from(messages);
        let text = err.to_string();
        assert!(text.starts_with("VALIDATION_ERROR: Validation error."));
        assert!(text.contains("msp_address"));
    }

    #[test]
    fn transport_error_shows_status_and_body() {
        let err = TransportError {
            status: Some(StatusCode::TOO_MANY_REQUESTS),
            body: "rate limited".to_owned(),
        };
        assert_eq!(err.to_string(), "HTTP 429 Too Many Requests: rate limited");
    }
}
