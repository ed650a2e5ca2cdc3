//! Configuration loading for the Podium client.
//!
//! All fields are required unless explicitly marked optional. No defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub auth: AuthConfig,
    pub request_timeout_ms: u64,
    /// Rows requested per page for every view.
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    pub api_key: Option<String>,
    pub jwt: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or PODIUM_CLIENT_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.auth.api_key.is_none() && self.auth.jwt.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "auth",
                reason: "api_key or jwt must be provided".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be > 0".to_string(),
            });
        }
        if self.page_size > 100 {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be <= 100".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("PODIUM_CLIENT_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ClientConfig {
        ClientConfig {
            api_base_url: "http://localhost:8080".to_string(),
            auth: AuthConfig {
                api_key: Some("test-key".to_string()),
                jwt: None,
            },
            request_timeout_ms: 5_000,
            page_size: 20,
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn config_requires_auth() {
        let mut config = base_config();
        config.auth = AuthConfig {
            api_key: None,
            jwt: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_rejects_zero_page_size() {
        let mut config = base_config();
        config.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_rejects_oversized_page() {
        let mut config = base_config();
        config.page_size = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_parses_from_toml() {
        let toml = r#"
            api_base_url = "https://api.podium.example"
            request_timeout_ms = 10000
            page_size = 25

            [auth]
            jwt = "token"
        "#;
        let config: ClientConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn config_rejects_unknown_fields() {
        let toml = r#"
            api_base_url = "https://api.podium.example"
            request_timeout_ms = 10000
            page_size = 25
            theme = "dark"

            [auth]
            jwt = "token"
        "#;
        assert!(toml::from_str::<ClientConfig>(toml).is_err());
    }
}
