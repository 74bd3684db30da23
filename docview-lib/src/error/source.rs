//! Collaborator error types

use std::time::Duration;

/// Errors reported by a [`DocumentSource`](crate::services::DocumentSource).
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// The storage layer rejected the query.
    #[error("Query rejected: {message}")]
    Rejected {
        /// Error message from the storage layer.
        message: String,
        /// HTTP-like status code, if the source has one.
        status: Option<u16>,
    },

    /// The request never reached the storage layer.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request took too long.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The response could not be turned into documents.
    #[error("Response parse error: {0}")]
    Parse(String),
}

impl SourceError {
    /// Creates a rejection without a status code.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            status: None,
        }
    }

    /// Creates a rejection with a status code.
    pub fn rejected_with_status(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Returns the status code if this is a rejection that carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => *status,
            _ => None,
        }
    }
}

/// Errors reported by an [`UploadDelegate`](crate::services::UploadDelegate).
///
/// Uploads are all-or-nothing: any error means none of the files are
/// assumed to have been stored.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UploadError {
    /// The target category does not accept uploads.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A file was refused by the storage layer.
    #[error("File rejected: {name}: {reason}")]
    FileRejected {
        /// Name of the refused file.
        name: String,
        /// Why it was refused.
        reason: String,
    },

    /// The request never reached the storage layer.
    #[error("Transport error: {0}")]
    Transport(String),
}
