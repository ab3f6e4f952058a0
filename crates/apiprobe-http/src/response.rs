//! Buffered transport response

use bytes::Bytes;
use reqwest::{header::HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{HttpError, Result};

/// A fully buffered response as reported by the transport.
///
/// Nothing here is interpreted: status, headers and body are exactly what
/// came off the wire.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Numeric status code
    pub status: StatusCode,
    /// Response headers (case-insensitive names)
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Decode the JSON body into the payload type.
    ///
    /// An empty body decodes as `null`, so `()`, `Option<_>` and
    /// `serde_json::Value` accept bodiless responses (HEAD, 204). When the
    /// JSON reading does not fit `T`, the raw text is offered to `T` as a
    /// plain string, so `String` receives any body that is not a JSON string
    /// verbatim.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let body: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(body).or_else(|e| {
            serde_json::from_value(serde_json::Value::String(self.text()))
                .map_err(|_| HttpError::Decode(e.to_string()))
        })
    }

    /// Body as UTF-8 text, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
