//! Client-level error types.

use floward_shared::ErrorBody;
use thiserror::Error;

use crate::i18n::MessageKey;
use crate::ports::{NavigationError, StorageError, TransportError};

/// Failures of a user action. Every variant is reported to the user and the
/// form stays usable afterwards.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local validation failed; no request was made.
    #[error("Validation failed: {0:?}")]
    Validation(MessageKey),

    /// The backend answered with a non-2xx status.
    #[error("Request rejected with status {status}")]
    Rejected { status: u16, body: ErrorBody },

    /// No response was received.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A 2xx response did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("Navigation failure: {0}")]
    Navigation(#[from] NavigationError),
}

impl ClientError {
    /// Whether the backend rejected the request with exactly `text` in
    /// `detail` or `error.message`.
    pub fn is_rejection(&self, text: &str) -> bool {
        matches!(self, ClientError::Rejected { body, .. } if body.reports(text))
    }
}
