//! Typed error classification for backend calls.
//!
//! Every failure of the data layer surfaces as an [`ApiError`]; callers
//! distinguish transport failures from application failures through
//! [`ApiError::status`], which reads 0 when no response was received.

use serde_json::Value;
use thiserror::Error;

use crate::response::StatusCode;

/// A classified failure of a backend call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No usable response: network unreachable, timeout, or the request
    /// could not be built.
    #[error("{message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },

    /// The server answered with a status outside the 200-299 range.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Server-provided message, or a synthesized `HTTP {status}: {reason}`.
        message: String,
        /// The decoded error payload, when the body was parseable.
        body: Option<Value>,
    },

    /// A success response whose payload did not match the expected shape.
    #[error("decode error: {message}")]
    Decode {
        /// Description of the mismatch.
        message: String,
    },
}

impl ApiError {
    /// Creates a transport-level failure.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an application failure from a response status and its decoded
    /// error body.
    ///
    /// The message is taken from the payload's `message` field when present,
    /// otherwise synthesized from the status line.
    #[must_use]
    pub fn from_status(status: StatusCode, body: Option<Value>) -> Self {
        let server_message = body
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        Self::Api {
            status: status.as_u16(),
            message: server_message
                .unwrap_or_else(|| format!("HTTP {}: {}", status.as_u16(), status.reason_phrase())),
            body,
        }
    }

    /// Creates a decode failure.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// The HTTP status associated with this error; 0 for failures where no
    /// response was received or consumed.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::Transport { .. } | Self::Decode { .. } => 0,
        }
    }

    /// Returns true if this is an application failure with status 401.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// The human-readable message carried by this error.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message } | Self::Api { message, .. } | Self::Decode { message } => {
                message
            }
        }
    }
}

/// Result type alias for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transport_status_is_zero() {
        let err = ApiError::transport("connection reset");
        assert_eq!(err.status(), 0);
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_server_message_preferred() {
        let body = serde_json::json!({"message": "token expired"});
        let err = ApiError::from_status(StatusCode::new(401), Some(body));
        assert_eq!(err.message(), "token expired");
        assert_eq!(err.status(), 401);
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_synthesized_message() {
        let err = ApiError::from_status(StatusCode::new(503), None);
        assert_eq!(err.message(), "HTTP 503: Service Unavailable");
        assert_eq!(err.status(), 503);
    }

    #[test]
    fn test_message_field_must_be_string() {
        let body = serde_json::json!({"message": 42});
        let err = ApiError::from_status(StatusCode::new(400), Some(body));
        assert_eq!(err.message(), "HTTP 400: Bad Request");
    }
}
