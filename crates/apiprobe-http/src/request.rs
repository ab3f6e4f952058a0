//! Per-call request options

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{HttpError, Result};

/// Transport options attached to a single request.
///
/// A service keeps one of these as its default and call sites may pass
/// another one that is layered on top with [`RequestConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    /// Extra request headers
    pub headers: HeaderMap,
    /// Timeout for this request, overriding the client-wide timeout
    pub timeout: Option<Duration>,
    /// Query string pairs appended to the URL
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header, replacing any previous value with the same name
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HttpError::InvalidHeader(format!("{name}: {e}")))?;
        let value =
            HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Append a query string pair
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Check whether no option is set
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.timeout.is_none() && self.query.is_empty()
    }

    /// Layer `overrides` on top of `self`.
    ///
    /// Headers in `overrides` replace headers of the same name, its timeout
    /// wins when set, and its query pairs follow ours.
    pub fn merge(&self, overrides: &RequestConfig) -> RequestConfig {
        let mut merged = self.clone();
        for name in overrides.headers.keys() {
            merged.headers.remove(name);
        }
        for (name, value) in &overrides.headers {
            merged.headers.append(name.clone(), value.clone());
        }
        if overrides.timeout.is_some() {
            merged.timeout = overrides.timeout;
        }
        merged.query.extend(overrides.query.iter().cloned());
        merged
    }
}
