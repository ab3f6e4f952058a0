//! Service configuration error types

use thiserror::Error;

/// Result type for configuration lookups
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors.
///
/// Kept apart from [`apiprobe_http::HttpError`] so callers can tell a
/// misconfigured suite from a failing server.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or both credentials are unset or empty
    #[error("Missing {} in environment configuration", .missing.join(" and "))]
    MissingCredentials { missing: Vec<&'static str> },

    /// Credentials produced a header value the transport cannot carry
    #[error("Invalid authorization header: {0}")]
    InvalidHeader(String),

    /// A `.env` file could not be read or parsed
    #[error("Environment error: {0}")]
    Env(String),
}
