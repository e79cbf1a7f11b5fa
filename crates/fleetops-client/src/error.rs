//! Error taxonomy for backend calls.

use std::time::Duration;

use thiserror::Error;

/// Failure of a backend call, classified for the retry loop.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The server answered outside the success range. Carries the
    /// server-supplied body text.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The call never reached a server (DNS/connect/transport failure).
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx body did not match the expected record shape.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The health gate refused the call before it was attempted.
    #[error("backend not ready: {0}")]
    BackendUnavailable(String),

    /// The backend did not become ready within the wait window.
    #[error("backend not ready after {0:?} timeout")]
    HealthTimeout(Duration),
}

impl ApiError {
    /// Whether the retry loop may try again.
    ///
    /// Server errors (>= 500) and transport failures are transient; client
    /// errors, decode failures and gate refusals are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http { status, .. } => *status >= 500,
            ApiError::Network(_) => true,
            ApiError::Decode(_) | ApiError::BackendUnavailable(_) | ApiError::HealthTimeout(_) => {
                false
            }
        }
    }

    /// HTTP status code, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        let err = ApiError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        let err = ApiError::Http {
            status: 404,
            message: "not found".to_string(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_network_errors_are_always_retryable() {
        assert!(ApiError::Network("connection refused".to_string()).is_retryable());
        assert_eq!(ApiError::Network("x".to_string()).status(), None);
    }

    #[test]
    fn test_gate_refusal_is_terminal() {
        assert!(!ApiError::BackendUnavailable("starting".to_string()).is_retryable());
        assert!(!ApiError::Decode("bad shape".to_string()).is_retryable());
    }
}
