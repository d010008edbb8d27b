// Client configuration: built once at startup and injected into the client.
//
// Sources are merged in this order (later sources override earlier):
// 1. `ClientConfig::default()`
// 2. an optional TOML file
// 3. environment variables prefixed with `HOTEL_` (e.g. `HOTEL_API_KEY`, `HOTEL_TIMEOUT_MS`)

use crate::api::ClientError;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://booking-com15.p.rapidapi.com/api/v1";
pub const DEFAULT_API_HOST: &str = "booking-com15.p.rapidapi.com";
pub const DEFAULT_LOCALE: &str = "en-us";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const CONFIG_ENV_PREFIX: &str = "HOTEL_";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_host: String,
    pub locale: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            api_host: DEFAULT_API_HOST.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

// The api key never reaches logs or panic messages.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            ""
        } else {
            "[redacted]"
        };
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .field("api_host", &self.api_host)
            .field("locale", &self.locale)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, api_host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: api_host.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    // Credentials are only checked for presence.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.api_key.trim().is_empty() {
            return Err(ClientError::ConfigError("api_key must be set".to_string()));
        }
        if self.api_host.trim().is_empty() {
            return Err(ClientError::ConfigError("api_host must be set".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ClientError::ConfigError("base_url must be set".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ClientError::ConfigError(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    // Join an endpoint path onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<ClientConfig, ClientError> {
        let mut figment = Figment::new().merge(Serialized::defaults(ClientConfig::default()));

        if let Some(path) = &self.config_path {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading client config file");
                figment = figment.merge(Toml::file(path));
            } else {
                tracing::warn!(path = %path.display(), "client config file not found, skipping");
            }
        }

        figment = figment.merge(Env::prefixed(&self.env_prefix));

        let config: ClientConfig = figment
            .extract()
            .map_err(|e| ClientError::ConfigError(e.to_string()))?;
        config.validate()?;

        tracing::info!(
            base_url = %config.base_url,
            api_host = %config.api_host,
            locale = %config.locale,
            timeout_ms = config.timeout_ms,
            "client config loaded"
        );
        Ok(config)
    }
}
