//! # API Error Taxonomy
//!
//! Three failure classes cross the REST boundary:
//!
//! - [`ApiError::Transport`]: no response was received (connectivity, DNS,
//!   TLS). Often transient.
//! - [`ApiError::Rejected`]: the server answered with a failure status,
//!   optionally carrying a human-readable `{message}` body.
//! - [`ApiError::Decode`]: the server answered 2xx but the body did not match
//!   the expected shape.
//!
//! Variants hold plain data (no `reqwest::Error` inside) so errors stay
//! `Clone` and can be recorded into view state verbatim.

use thiserror::Error;

/// Errors produced by the directory API boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {message}")]
    Transport {
        /// Transport-level detail, for logs only
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("server rejected request ({status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Server-provided message, surfaced to the user verbatim when present
        message: Option<String>,
    },

    /// The response body could not be decoded into the expected type.
    #[error("malformed response: {message}")]
    Decode {
        /// Decoder detail, for logs only
        message: String,
    },
}

impl ApiError {
    /// Classify a `reqwest` failure into transport vs decode.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }

    /// The server-provided message, if the server supplied one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether no response was received at all.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_with_message() {
        let err = ApiError::Rejected {
            status: 401,
            message: Some("Invalid credentials".into()),
        };
        assert_eq!(
            err.to_string(),
            "server rejected request (401): Invalid credentials"
        );
        assert_eq!(err.server_message(), Some("Invalid credentials"));
    }

    #[test]
    fn test_rejected_display_without_message() {
        let err = ApiError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "server rejected request (500): no detail");
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_transport_classification() {
        let err = ApiError::Transport {
            message: "connection refused".into(),
        };
        assert!(err.is_transport());
        assert_eq!(err.server_message(), None);
    }
}
