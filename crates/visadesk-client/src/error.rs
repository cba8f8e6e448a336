//! Error types for the API client.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Message used when the server gives no usable error text.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Message used when the request never reached the server.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// An error reply from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {status})")]
pub struct ApiError {
    /// Human readable message.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Field errors reported by the server.
    pub errors: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    /// Builds an error from a non-2xx reply.
    ///
    /// The message is taken from `message`, then `error.message`, then the
    /// status text.
    pub fn from_reply(status: u16, status_text: &str, body: &[u8]) -> Self {
        let parsed: Option<Value> = serde_json::from_slice(body).ok();

        let message = parsed
            .as_ref()
            .and_then(|v| {
                v.get("message")
                    .and_then(Value::as_str)
                    .or_else(|| v.pointer("/error/message").and_then(Value::as_str))
            })
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| (!status_text.is_empty()).then(|| status_text.to_string()))
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());

        let errors = parsed
            .as_ref()
            .and_then(|v| v.get("errors"))
            .and_then(|e| serde_json::from_value(e.clone()).ok());

        Self {
            message,
            status,
            errors,
        }
    }

    /// Returns whether the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Client-side errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request did not complete.
    #[error("network error: {0}")]
    Network(String),

    /// The reply body did not have the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading or writing local preferences failed.
    #[error("preferences i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status of the failure, 0 when the server was never reached.
    pub fn status(&self) -> u16 {
        match self {
            Self::Api(e) => e.status,
            _ => 0,
        }
    }

    /// Returns whether this failure means the session expired.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }

    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.message.clone(),
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
