//! Basic-auth credentials from configuration

use apiprobe_http::{
    header::{HeaderValue, AUTHORIZATION},
    RequestConfig,
};
use base64::{engine::general_purpose, Engine as _};
use tracing::warn;

use crate::{
    error::{ConfigError, Result},
    provider::{ConfigProvider, PASSWORD_KEY, USERNAME_KEY},
};

/// Build a request configuration carrying `Authorization: Basic ...` from
/// the `USER` and `PASSWORD` values of `provider`.
///
/// Unset or empty credentials fail before anything touches the network.
pub fn basic_auth_config(provider: &dyn ConfigProvider) -> Result<RequestConfig> {
    let username = provider.get(USERNAME_KEY).filter(|v| !v.is_empty());
    let password = provider.get(PASSWORD_KEY).filter(|v| !v.is_empty());

    let (username, password) = match (username, password) {
        (Some(username), Some(password)) => (username, password),
        (username, password) => {
            let mut missing = Vec::new();
            if username.is_none() {
                missing.push(USERNAME_KEY);
            }
            if password.is_none() {
                missing.push(PASSWORD_KEY);
            }
            warn!("Cannot build basic auth, missing {}", missing.join(", "));
            return Err(ConfigError::MissingCredentials { missing });
        }
    };

    let encoded = general_purpose::STANDARD.encode(format!("{username}:{password}"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| ConfigError::InvalidHeader(e.to_string()))?;
    value.set_sensitive(true);

    let mut config = RequestConfig::new();
    config.headers.insert(AUTHORIZATION, value);
    Ok(config)
}
