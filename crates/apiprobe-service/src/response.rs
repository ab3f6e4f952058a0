//! Normalized response envelope

use std::collections::BTreeMap;

use apiprobe_http::{header::HeaderMap, HttpError, TransportResponse};
use serde::{de::DeserializeOwned, Serialize, Serializer};

/// What every verb method hands back: the decoded payload plus the status
/// and headers the transport reported, and the measured round-trip time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    data: T,
    status: u16,
    #[serde(serialize_with = "serialize_headers")]
    headers: HeaderMap,
    response_time: u64,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, status: u16, headers: HeaderMap, response_time: u64) -> Self {
        Self {
            data,
            status,
            headers,
            response_time,
        }
    }

    /// Decoded payload
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Status code exactly as reported by the transport
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Milliseconds between dispatch and completion
    pub fn response_time(&self) -> u64 {
        self.response_time
    }

    /// Take the payload, dropping the rest
    pub fn into_data(self) -> T {
        self.data
    }

    /// Split into `(data, status, headers, response_time)`
    pub fn into_parts(self) -> (T, u16, HeaderMap, u64) {
        (self.data, self.status, self.headers, self.response_time)
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Build the envelope from a transport response and a measured time.
    pub fn from_transport(
        response: TransportResponse,
        response_time: u64,
    ) -> Result<Self, HttpError> {
        let data = response.decode()?;
        Ok(Self::new(
            data,
            response.status.as_u16(),
            response.headers,
            response_time,
        ))
    }
}

fn serialize_headers<S>(headers: &HeaderMap, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let map: BTreeMap<&str, String> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    map.serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiprobe_http::{header::HeaderValue, StatusCode};
    use serde_json::json;

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc"));
        headers
    }

    #[test]
    fn test_from_transport_passes_fields_through() {
        let transport = TransportResponse::new(StatusCode::ACCEPTED, headers(), r#"{"id": 4}"#);
        let response: ApiResponse<serde_json::Value> =
            ApiResponse::from_transport(transport, 12).unwrap();

        assert_eq!(response.data(), &json!({"id": 4}));
        assert_eq!(response.status(), 202);
        assert_eq!(response.headers(), &headers());
        assert_eq!(response.response_time(), 12);
    }

    #[test]
    fn test_from_transport_decode_failure() {
        let transport = TransportResponse::new(StatusCode::OK, HeaderMap::new(), "[1]");
        let result = ApiResponse::<u32>::from_transport(transport, 0);
        assert!(matches!(result, Err(HttpError::Decode(_))));
    }

    #[test]
    fn test_serializes_camel_case_with_header_map() {
        let response = ApiResponse::new(json!({"ok": true}), 200, headers(), 7);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "data": {"ok": true},
                "status": 200,
                "headers": {"x-request-id": "abc"},
                "responseTime": 7
            })
        );
    }

    #[test]
    fn test_into_parts() {
        let (data, status, headers, response_time) =
            ApiResponse::new("payload", 418, HeaderMap::new(), 3).into_parts();
        assert_eq!(data, "payload");
        assert_eq!(status, 418);
        assert!(headers.is_empty());
        assert_eq!(response_time, 3);
    }
}
