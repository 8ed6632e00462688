//! Error types for the mapping service client.

use thiserror::Error;

/// Errors from a mapping suggestion request.
///
/// All of these leave the wizard on the upload step; they differ only in
/// the message shown.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// No credential, or the service rejected it.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The client could not be built or the request could not be sent.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("mapping service error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body was not a valid mapping response.
    #[error("invalid mapping response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::NotAuthenticated => "Your session has expired. Please sign in again.",
            Self::Network(_) => {
                "Could not reach the import service. Please check your internet connection."
            }
            Self::Status { .. } | Self::Decode(_) => {
                "The import service could not analyze this file. Please try again."
            }
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::NotAuthenticated | Self::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for mapping service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert!(
            ServiceError::NotAuthenticated
                .user_message()
                .contains("sign in again")
        );
        assert!(
            ServiceError::Network("connection refused".to_string())
                .user_message()
                .contains("internet connection")
        );
    }

    #[test]
    fn test_retryable() {
        assert!(ServiceError::Network("timeout".to_string()).is_retryable());
        assert!(
            ServiceError::Status {
                status: 503,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(
            !ServiceError::Status {
                status: 422,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(!ServiceError::NotAuthenticated.is_retryable());
    }
}
