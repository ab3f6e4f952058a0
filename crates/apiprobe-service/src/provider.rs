//! Configuration sources for services
//!
//! Services never read the process environment directly; they ask a
//! [`ConfigProvider`]. [`EnvProvider`] is the production source and
//! [`MapProvider`] keeps values in memory for tests and embedding.

use std::{collections::HashMap, path::Path};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Key holding the base URL every endpoint path is appended to
pub const BASE_URL_KEY: &str = "BASEURL";

/// Key holding the basic-auth username
pub const USERNAME_KEY: &str = "USER";

/// Key holding the basic-auth password
pub const PASSWORD_KEY: &str = "PASSWORD";

/// Read-only source of configuration values
pub trait ConfigProvider: Send + Sync {
    /// Look up a value, `None` when unset
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads values from the process environment at lookup time
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProvider;

impl EnvProvider {
    pub fn new() -> Self {
        Self
    }

    /// Load a `.env` file from the working directory (or a parent) into the
    /// process environment, then read from it.
    ///
    /// A missing `.env` file is not an error.
    pub fn with_dotenv() -> Self {
        match dotenv::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env file loaded: {e}"),
        }
        Self
    }

    /// Load the `.env` file at `path` into the process environment, then
    /// read from it.
    ///
    /// Variables already set in the environment keep their values.
    pub fn with_dotenv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        dotenv::from_path(path)
            .map_err(|e| ConfigError::Env(format!("{}: {e}", path.display())))?;
        debug!("Loaded environment from {}", path.display());
        Ok(Self)
    }
}

impl ConfigProvider for EnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory configuration values
#[derive(Debug, Clone, Default)]
pub struct MapProvider {
    values: HashMap<String, String>,
}

impl MapProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the values of the `.env` file at `path` without touching the
    /// process environment.
    pub fn from_dotenv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let env_error = |e: dotenv::Error| ConfigError::Env(format!("{}: {e}", path.display()));
        dotenv::from_path_iter(path)
            .map_err(env_error)?
            .map(|item| item.map_err(env_error))
            .collect()
    }

    /// Set a value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigProvider for MapProvider {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapProvider
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
