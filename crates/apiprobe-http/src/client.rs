//! HTTP client implementation

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
    request::RequestConfig,
    response::TransportResponse,
};

/// Mockable HTTP client trait.
///
/// Implementors only have to provide [`HttpClientTrait::request`]; the verb
/// operations forward to it.
#[async_trait]
pub trait HttpClientTrait: Send + Sync {
    /// Execute a request with an optional JSON body
    async fn request(
        &self,
        method: Method,
        url: &str,
        data: Option<Value>,
        config: &RequestConfig,
    ) -> Result<TransportResponse>;

    /// Execute a GET request
    async fn get(&self, url: &str, config: &RequestConfig) -> Result<TransportResponse> {
        self.request(Method::GET, url, None, config).await
    }

    /// Execute a POST request
    async fn post(
        &self,
        url: &str,
        data: Value,
        config: &RequestConfig,
    ) -> Result<TransportResponse> {
        self.request(Method::POST, url, Some(data), config).await
    }

    /// Execute a PUT request
    async fn put(
        &self,
        url: &str,
        data: Value,
        config: &RequestConfig,
    ) -> Result<TransportResponse> {
        self.request(Method::PUT, url, Some(data), config).await
    }

    /// Execute a PATCH request
    async fn patch(
        &self,
        url: &str,
        data: Value,
        config: &RequestConfig,
    ) -> Result<TransportResponse> {
        self.request(Method::PATCH, url, Some(data), config).await
    }

    /// Execute a DELETE request
    async fn delete(&self, url: &str, config: &RequestConfig) -> Result<TransportResponse> {
        self.request(Method::DELETE, url, None, config).await
    }

    /// Execute a HEAD request
    async fn head(&self, url: &str, config: &RequestConfig) -> Result<TransportResponse> {
        self.request(Method::HEAD, url, None, config).await
    }

    /// Execute an OPTIONS request
    async fn options(&self, url: &str, config: &RequestConfig) -> Result<TransportResponse> {
        self.request(Method::OPTIONS, url, None, config).await
    }
}

/// Production HTTP client
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client with configuration
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(if config.max_redirects > 0 {
                reqwest::redirect::Policy::limited(config.max_redirects)
            } else {
                reqwest::redirect::Policy::none()
            });

        // Configure proxy if provided
        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        Ok(Self { inner, config })
    }

    /// Create HTTP client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpConfig::default())
    }

    /// Get underlying reqwest client (for advanced usage)
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Get configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn map_send_error(&self, e: reqwest::Error, config: &RequestConfig) -> HttpError {
        if e.is_timeout() {
            HttpError::Timeout(config.timeout.unwrap_or(self.config.timeout))
        } else {
            HttpError::RequestFailed(e)
        }
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        data: Option<Value>,
        config: &RequestConfig,
    ) -> Result<TransportResponse> {
        let url = url
            .parse::<url::Url>()
            .map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))?;

        debug!("HTTP {}: {}", method, url);

        let mut request = self
            .inner
            .request(method, url)
            .headers(config.headers.clone());

        if !config.query.is_empty() {
            request = request.query(&config.query);
        }
        if let Some(timeout) = config.timeout {
            request = request.timeout(timeout);
        }
        if let Some(data) = data {
            request = request.json(&data);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_send_error(e, config))?;

        let status = response.status();

        // Check for HTTP error status
        if self.config.error_for_status && !status.is_success() {
            return Err(HttpError::HttpStatus {
                status,
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e, config))?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

/// Create a shared HTTP client (Arc-wrapped for cloning)
pub fn shared_client(config: HttpConfig) -> Result<Arc<dyn HttpClientTrait>> {
    Ok(Arc::new(HttpClient::new(config)?))
}

static GLOBAL_CLIENT: OnceCell<Arc<dyn HttpClientTrait>> = OnceCell::new();

/// Process-wide client built from [`HttpConfig::default`] on first use.
///
/// Every caller gets a handle to the same instance.
pub fn global_client() -> Result<Arc<dyn HttpClientTrait>> {
    GLOBAL_CLIENT
        .get_or_try_init(|| shared_client(HttpConfig::default()))
        .map(Arc::clone)
}
