//! Application-level configuration loading for the flag API and the form pages.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the binaries look for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/forme.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "GOODGLE_FORME_CONFIG_PATH";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_SUBMIT_LATENCY_MS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Port the flag API listens on unless `PORT`/`SERVER_PORT` is set.
    pub port: u16,
    /// Base URL the flag client talks to.
    pub api_base_url: String,
    /// Simulated network delay applied when a form is submitted.
    pub submit_latency: Duration,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to baked-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|err| {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse config; falling back to defaults"
                );
                Self::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON document; absent keys keep their default.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        let raw = serde_json::from_str::<RawConfig>(contents)?;
        let config: Self = raw.into();
        info!(
            port = config.port,
            api_base_url = %config.api_base_url,
            submit_latency_ms = config.submit_latency.as_millis() as u64,
            "loaded forme config"
        );
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            submit_latency: Duration::from_millis(DEFAULT_SUBMIT_LATENCY_MS),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    port: Option<u16>,
    api_base_url: Option<String>,
    submit_latency_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            port: value.port.unwrap_or(defaults.port),
            api_base_url: value
                .api_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_base_url),
            submit_latency: value
                .submit_latency_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.submit_latency),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "submitLatencyMs": 50 }"#).unwrap();
        assert_eq!(config.submit_latency, Duration::from_millis(50));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = AppConfig::from_json(r#"{ "apiBaseUrl": "http://forme.test/" }"#).unwrap();
        assert_eq!(config.api_base_url, "http://forme.test");
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(AppConfig::from_json("{ port: nope }").is_err());
    }
}
