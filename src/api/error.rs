//! Error taxonomy for backend calls.

use derive_more::{Display, Error};

/// What went wrong talking to the backend.
///
/// `Validation` is handled like `Network` in the UI; it stays a separate
/// variant so logs distinguish a broken transport from a broken payload.
/// `AuthRequired` is distinguishable so callers can force re-authentication.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ApiError {
    /// Transport failure or an unexpected HTTP status.
    #[display("network failure: {message}")]
    Network {
        /// Cause, safe to show in the status line.
        message: String,
    },
    /// The backend rejected the credentials.
    #[display("authentication required")]
    AuthRequired,
    /// The response arrived but could not be understood.
    #[display("invalid server response: {message}")]
    Validation {
        /// Parse or shape problem description.
        message: String,
    },
}

impl ApiError {
    /// Network failure from any displayable cause.
    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self::Network {
            message: cause.to_string(),
        }
    }

    /// Validation failure from any displayable cause.
    pub fn validation(cause: impl std::fmt::Display) -> Self {
        Self::Validation {
            message: cause.to_string(),
        }
    }

    /// True when retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Validation { .. })
    }
}
