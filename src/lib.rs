//! apiprobe: a thin base for API test clients
//!
//! Re-exports the transport and service crates so suites can depend on one
//! package.

pub use apiprobe_http as http;
pub use apiprobe_service as service;

pub use apiprobe_http::{HttpClient, HttpClientTrait, HttpConfig, HttpError, RequestConfig};
pub use apiprobe_service::{ApiResponse, ConfigError, ConfigProvider, ServiceBase};
