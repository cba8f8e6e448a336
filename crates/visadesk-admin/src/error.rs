//! Error types for the dashboard pages.

use thiserror::Error;

/// Errors returned by page operations.
///
/// Failed validation surfaces as [`FormError::Invalid`](visadesk_forms::FormError::Invalid);
/// the messages themselves stay in the form's error map.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Form error.
    #[error(transparent)]
    Form(#[from] visadesk_forms::FormError),

    /// API error.
    #[error(transparent)]
    Client(#[from] visadesk_client::ClientError),

    /// Item not found in the loaded list.
    #[error("item not found: {0}")]
    NotFound(i64),

    /// No local entry has this key.
    #[error("unknown entry: {0}")]
    UnknownEntry(u64),

    /// No item is being edited.
    #[error("no item is being edited")]
    NotEditing,
}

impl AdminError {
    /// Returns the field to focus when validation failed.
    pub fn invalid_field(&self) -> Option<&str> {
        match self {
            Self::Form(visadesk_forms::FormError::Invalid { first }) => Some(first),
            _ => None,
        }
    }
}

/// Result type alias for page operations.
pub type Result<T> = std::result::Result<T, AdminError>;
