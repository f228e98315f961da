//! # Categorized Application Errors
//!
//! Three classes reach the user:
//!
//! - **Validation**: caught locally before any network call
//! - **Network**: no response received; generic connectivity message
//! - **Rejected**: the server answered with a failure; its message is used
//!   verbatim when present, else a per-operation fallback
//!
//! Storage failures are folded in as a fourth class so session workflows can
//! report a failed credential write without a partial state flip.

use localist_api::ApiError;
use thiserror::Error;

/// Message shown when the server could not be reached at all.
const CONNECTIVITY_MESSAGE: &str =
    "Unable to reach the server. Check your connection and try again.";

/// Errors surfaced by app-core workflows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// Local input validation failed; nothing was sent.
    #[error("{message}")]
    Validation {
        /// What the user should fix
        message: String,
    },

    /// No response received from the server.
    #[error("{message}")]
    Network {
        /// Generic connectivity message
        message: String,
    },

    /// The server rejected the operation.
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Server message verbatim, or the operation's fallback
        message: String,
    },

    /// The persisted credential record could not be written or cleared.
    #[error("{message}")]
    Storage {
        /// Storage failure detail
        message: String,
    },
}

impl AppError {
    /// Validation failure with a user-facing message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Map a boundary error, applying `fallback` where the server gave no
    /// usable message. `fallback` is operation-specific ("Failed to login",
    /// "Failed to register", ...).
    #[must_use]
    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Transport { .. } => Self::Network {
                message: CONNECTIVITY_MESSAGE.to_string(),
            },
            ApiError::Rejected { status, message } => Self::Rejected {
                status: *status,
                message: message
                    .clone()
                    .unwrap_or_else(|| fallback.to_string()),
            },
            // A response arrived but was unusable; treat like a rejection
            // with the operation fallback.
            ApiError::Decode { .. } => Self::Rejected {
                status: 0,
                message: fallback.to_string(),
            },
        }
    }

    /// The message to record into view state and show near the form.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Network { message }
            | Self::Rejected { message, .. }
            | Self::Storage { message } => message,
        }
    }
}
