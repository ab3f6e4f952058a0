//! HTTP transport error types

use thiserror::Error;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP transport errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// Header name or value rejected by the transport
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// HTTP error status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(String),

    /// Response body could not be decoded into the expected payload
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),
}

impl HttpError {
    /// Status code reported by the server, if the failure carries one
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            HttpError::HttpStatus { status, .. } => Some(*status),
            HttpError::RequestFailed(e) => e.status(),
            _ => None,
        }
    }

    /// Check if the failure happened before a response was received
    pub fn is_network(&self) -> bool {
        match self {
            HttpError::RequestFailed(e) => e.is_connect() || e.is_request() || e.is_timeout(),
            HttpError::Timeout(_) => true,
            _ => false,
        }
    }
}
