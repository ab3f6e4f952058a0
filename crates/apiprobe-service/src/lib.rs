//! Base for API test services
//!
//! Wraps an [`apiprobe_http::HttpClientTrait`] transport with one method per
//! HTTP verb and measures every round trip.
//!
//! ## Features
//!
//! - **Uniform envelope**: Payload, status, headers and response time in `ApiResponse`
//! - **Injected collaborators**: Transport and configuration source are passed in
//! - **Opt-in basic auth**: `authenticate` builds the header from `USER`/`PASSWORD`
//! - **Pass-through errors**: Transport failures reach the caller untouched

pub mod auth;
pub mod error;
pub mod provider;
pub mod response;
pub mod service;
pub mod timing;

pub use auth::basic_auth_config;
pub use error::ConfigError;
pub use provider::{
    ConfigProvider, EnvProvider, MapProvider, BASE_URL_KEY, PASSWORD_KEY, USERNAME_KEY,
};
pub use response::ApiResponse;
pub use service::ServiceBase;
pub use timing::{elapsed_millis, timed};
