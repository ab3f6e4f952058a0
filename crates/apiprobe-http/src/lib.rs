//! HTTP transport for apiprobe services
//!
//! Provides a mockable, configurable HTTP client wrapper that the service
//! layer delegates all network I/O to.
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpClientTrait`
//! - **Seven verb operations**: GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS
//! - **Per-call options**: Headers, timeout and query via `RequestConfig`
//! - **Shared instance**: One process-wide client via `global_client`
//! - **Testing support**: Easy mocking with wiremock

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

pub use client::{global_client, shared_client, HttpClient, HttpClientTrait};
pub use config::HttpConfig;
pub use error::{HttpError, Result};
pub use request::RequestConfig;
pub use response::TransportResponse;

/// Re-export commonly used types
pub use reqwest::{header, Method, StatusCode};
