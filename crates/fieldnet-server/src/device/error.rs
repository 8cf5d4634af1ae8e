//! Device error types

use thiserror::Error;

/// Errors returned by device controller operations.
///
/// All variants are transient from the reconciler's point of view: they are
/// logged and the current cycle retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("unexpected status {status} from {endpoint}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("device unavailable: {0}")]
    Unavailable(String),
}

impl DeviceError {
    pub(crate) fn transport(endpoint: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn malformed(endpoint: &str, err: impl std::fmt::Display) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }
}
