use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// Runtime settings for the portal (not per-request state).

const DEFAULT_CONFIG_FILE: &str = "portal.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),
    #[error("invalid listen address {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub host: String,
    pub port: u16,
    pub api_base_url: String,
    pub api_timeout_ms: u64,
    pub api_health_path: String,
    pub cookie_secure: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            api_timeout_ms: 5000,
            api_health_path: "/health/health".to_string(),
            cookie_secure: false,
        }
    }
}

impl PortalConfig {
    // Defaults, then the TOML file, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_file_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("PORTAL_HOST") {
            self.host = host;
        }
        if let Some(raw) = lookup("PORTAL_PORT") {
            self.port = parse_value("PORTAL_PORT", &raw)?;
        }
        if let Some(url) = lookup("API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup("API_TIMEOUT_MS") {
            self.api_timeout_ms = parse_value("API_TIMEOUT_MS", &raw)?;
        }
        if let Some(path) = lookup("API_HEALTH_PATH") {
            self.api_health_path = path;
        }
        if let Some(raw) = lookup("COOKIE_SECURE") {
            self.cookie_secure = parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                key: "COOKIE_SECURE",
                value: raw,
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.api_base_url)
            .map_err(|err| ConfigError::InvalidUrl(format!("{}: {err}", self.api_base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                self.api_base_url
            )));
        }
        if self.api_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "api_timeout_ms",
                value: "0".to_string(),
            });
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidAddress(format!(":{}", self.port)));
        }
        Ok(())
    }

    // The host may be an IP literal or a name such as `localhost`.
    pub async fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let target = format!("{}:{}", self.host, self.port);
        let mut addrs = tokio::net::lookup_host(target.clone())
            .await
            .map_err(|err| ConfigError::InvalidAddress(format!("{target}: {err}")))?;
        addrs
            .next()
            .ok_or_else(|| ConfigError::InvalidAddress(target))
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }
}

// `PORTAL_CONFIG` wins; otherwise `portal.toml` in the working directory if present.
fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("PORTAL_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.is_file().then_some(fallback)
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
