//! Error types for the Serverspace API client

use thiserror::Error;

use crate::records::ValidationError;

/// Errors returned by [`SsClient`](crate::SsClient) and the resource handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Response { status: u16, message: String },

    /// The request never produced a response (DNS, connect, TLS, timeout)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A 2xx body could not be decoded into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 2xx body did not carry the expected envelope key
    #[error("Response is missing the '{key}' envelope")]
    MissingEnvelope { key: String },

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("No base URL configured for the client")]
    MissingBaseUrl,

    /// Record payload rejected before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// HTTP status of the failed response, if there was one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Response { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if the API rejected the key (401)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// Returns true if the request could not reach the API at all
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, ApiError::Request(e) if e.is_connect() || e.is_timeout())
    }
}
