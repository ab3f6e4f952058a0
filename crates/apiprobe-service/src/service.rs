//! Base for API test services
//!
//! A concrete service owns a [`ServiceBase`] built with its endpoint path and
//! calls the verb methods with `service.url()` or a URL derived from it:
//!
//! ```no_run
//! use apiprobe_service::{ApiResponse, ServiceBase};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//! }
//!
//! struct UsersService {
//!     base: ServiceBase,
//! }
//!
//! impl UsersService {
//!     async fn list(&self) -> apiprobe_http::Result<ApiResponse<Vec<User>>> {
//!         self.base.get(self.base.url(), None).await
//!     }
//! }
//! ```

use std::{borrow::Cow, sync::Arc};

use apiprobe_http::{
    global_client, HttpClientTrait, HttpError, Method, RequestConfig, Result, TransportResponse,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    auth::basic_auth_config,
    error::ConfigError,
    provider::{ConfigProvider, EnvProvider, BASE_URL_KEY},
    response::ApiResponse,
    timing::timed,
};

/// Shared plumbing for a service bound to one endpoint.
///
/// Every verb method times the transport call and wraps the outcome in an
/// [`ApiResponse`]. Transport failures are returned unchanged.
#[derive(Clone)]
pub struct ServiceBase {
    client: Arc<dyn HttpClientTrait>,
    provider: Arc<dyn ConfigProvider>,
    url: String,
    default_config: RequestConfig,
}

impl ServiceBase {
    /// Bind a service to `endpoint_path`, resolved against the provider's
    /// base URL (empty when unset).
    pub fn new(
        endpoint_path: &str,
        client: Arc<dyn HttpClientTrait>,
        provider: Arc<dyn ConfigProvider>,
    ) -> Self {
        let base_url = provider.get(BASE_URL_KEY).unwrap_or_default();
        Self {
            url: format!("{base_url}{endpoint_path}"),
            client,
            provider,
            default_config: RequestConfig::default(),
        }
    }

    /// Bind a service using the process-wide client and the process
    /// environment.
    pub fn from_env(endpoint_path: &str) -> Result<Self> {
        Ok(Self::new(
            endpoint_path,
            global_client()?,
            Arc::new(EnvProvider::new()),
        ))
    }

    /// Replace the configuration used when a call site passes none
    pub fn with_default_config(mut self, config: RequestConfig) -> Self {
        self.default_config = config;
        self
    }

    /// Base URL as currently configured
    pub fn base_url(&self) -> String {
        self.provider.get(BASE_URL_KEY).unwrap_or_default()
    }

    /// Full URL of this service's endpoint
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn default_config(&self) -> &RequestConfig {
        &self.default_config
    }

    pub fn client(&self) -> &Arc<dyn HttpClientTrait> {
        &self.client
    }

    /// Basic-auth configuration from the provider's credentials.
    ///
    /// Not attached automatically; pass the result to a verb method.
    pub fn authenticate(&self) -> std::result::Result<RequestConfig, ConfigError> {
        basic_auth_config(self.provider.as_ref())
    }

    pub async fn get<T>(&self, url: &str, config: Option<&RequestConfig>) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let config = self.effective_config(config);
        let (response, elapsed) = timed(self.client.get(url, &config)).await?;
        Self::build_response(Method::GET, url, response, elapsed)
    }

    pub async fn post<T, B>(
        &self,
        url: &str,
        data: &B,
        config: Option<&RequestConfig>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let data = encode_body(data)?;
        let config = self.effective_config(config);
        let (response, elapsed) = timed(self.client.post(url, data, &config)).await?;
        Self::build_response(Method::POST, url, response, elapsed)
    }

    pub async fn put<T, B>(
        &self,
        url: &str,
        data: &B,
        config: Option<&RequestConfig>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let data = encode_body(data)?;
        let config = self.effective_config(config);
        let (response, elapsed) = timed(self.client.put(url, data, &config)).await?;
        Self::build_response(Method::PUT, url, response, elapsed)
    }

    pub async fn patch<T, B>(
        &self,
        url: &str,
        data: &B,
        config: Option<&RequestConfig>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let data = encode_body(data)?;
        let config = self.effective_config(config);
        let (response, elapsed) = timed(self.client.patch(url, data, &config)).await?;
        Self::build_response(Method::PATCH, url, response, elapsed)
    }

    pub async fn delete<T>(
        &self,
        url: &str,
        config: Option<&RequestConfig>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let config = self.effective_config(config);
        let (response, elapsed) = timed(self.client.delete(url, &config)).await?;
        Self::build_response(Method::DELETE, url, response, elapsed)
    }

    pub async fn head<T>(&self, url: &str, config: Option<&RequestConfig>) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let config = self.effective_config(config);
        let (response, elapsed) = timed(self.client.head(url, &config)).await?;
        Self::build_response(Method::HEAD, url, response, elapsed)
    }

    pub async fn options<T>(
        &self,
        url: &str,
        config: Option<&RequestConfig>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let config = self.effective_config(config);
        let (response, elapsed) = timed(self.client.options(url, &config)).await?;
        Self::build_response(Method::OPTIONS, url, response, elapsed)
    }

    fn effective_config(&self, config: Option<&RequestConfig>) -> Cow<'_, RequestConfig> {
        match config {
            Some(config) => Cow::Owned(self.default_config.merge(config)),
            None => Cow::Borrowed(&self.default_config),
        }
    }

    fn build_response<T>(
        method: Method,
        url: &str,
        response: TransportResponse,
        response_time: u64,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        debug!("{} {} -> {} in {}ms", method, url, response.status, response_time);
        ApiResponse::from_transport(response, response_time)
    }
}

fn encode_body<B: Serialize + ?Sized>(data: &B) -> Result<Value> {
    serde_json::to_value(data).map_err(|e| HttpError::Encode(e.to_string()))
}
