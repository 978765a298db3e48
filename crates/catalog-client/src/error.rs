//! Error types for the catalog API client

use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the catalog backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure: connection refused, reset, timeout
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API returned error {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Response body was not the expected JSON shape
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Configured base URL cannot be used
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        message: String,
    },

    /// Injected failure from a test double
    #[error("Mock source failure: {message}")]
    Mock {
        /// Failure message
        message: String,
    },
}

impl ClientError {
    /// Create a status error
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Create a decode error
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Create a mock failure
    pub fn mock(message: impl Into<String>) -> Self {
        Self::Mock {
            message: message.into(),
        }
    }

    /// Whether the request never produced an HTTP response
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Mock { .. })
    }

    /// HTTP status, when the backend answered
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ClientError> for catalog_core::Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidBaseUrl { url, message } => Self::Configuration {
                message: format!("invalid base URL '{url}': {message}"),
            },
            other => Self::Api(other.to_string()),
        }
    }
}
