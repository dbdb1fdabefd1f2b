//! Gateway configuration.
//!
//! The backend URL and an optional request timeout come from the
//! environment (or from CLI flags that fall back to the same variables).

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Environment variable holding the backend base URL (without `/api`).
pub const ENV_BACKEND_URL: &str = "GLASS_BACKEND_URL";

/// Environment variable holding the HTTP timeout in whole seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "GLASS_HTTP_TIMEOUT_SECS";

/// Backend used when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Path prefix every endpoint lives under.
pub const API_PREFIX: &str = "/api";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid backend url '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("invalid http timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub backend_url: Url,
    /// `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(backend_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            value: backend_url.to_string(),
            reason,
        };
        let url = Url::parse(backend_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        Ok(Self {
            backend_url: url,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `GLASS_BACKEND_URL` and `GLASS_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(ENV_BACKEND_URL).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let mut config = Self::new(&url)?;
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            config = config.with_timeout(parse_timeout_secs(&raw)?);
        }
        Ok(config)
    }

    /// `<backend>/api`, without a trailing slash.
    pub fn api_base(&self) -> String {
        format!(
            "{}{}",
            self.backend_url.as_str().trim_end_matches('/'),
            API_PREFIX
        )
    }
}

/// Parse a positive whole number of seconds.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_backend() {
        let config = GatewayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base(), "http://localhost:8001/api");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = GatewayConfig::from_lookup(lookup(&[
            (ENV_BACKEND_URL, "https://tasks.example.com/"),
            (ENV_HTTP_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();
        assert_eq!(config.api_base(), "https://tasks.example.com/api");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            GatewayConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            GatewayConfig::new("ftp://example.com"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert_eq!(
            parse_timeout_secs("0"),
            Err(ConfigError::InvalidTimeout("0".into()))
        );
        assert!(parse_timeout_secs("soon").is_err());
    }

    #[test]
    fn keeps_a_path_prefix() {
        let config = GatewayConfig::new("http://proxy.local/glass").unwrap();
        assert_eq!(config.api_base(), "http://proxy.local/glass/api");
    }
}
