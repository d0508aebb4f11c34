use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_path: PathBuf,

    // Web Server
    pub web_host: String,
    pub web_port: u16,

    // Listings
    pub page_size: i64,

    // Remote search API ("fast search"); absent means DB search only
    pub search_api_url: Option<String>,
    pub search_api_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_path: PathBuf::from(env_or_default("DATABASE_PATH", "./data/archive.sqlite")),
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,
            page_size: parse_env_i64("PAGE_SIZE", 20)?,
            search_api_url: optional_env("SEARCH_API_URL"),
            search_api_timeout: Duration::from_secs(parse_env_u64("SEARCH_API_TIMEOUT_SECS", 15)?),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size < 1 {
            return Err(ConfigError::InvalidValue {
                name: "PAGE_SIZE".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(url) = &self.search_api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    name: "SEARCH_API_URL".to_string(),
                    message: "must start with http:// or https://".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|source| ConfigError::ParseInt {
            name: name.to_string(),
            source,
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|source| ConfigError::ParseInt {
            name: name.to_string(),
            source,
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_i64(name: &str, default: i64) -> Result<i64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|source| ConfigError::ParseInt {
            name: name.to_string(),
            source,
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config {
            database_path: PathBuf::from("./data/archive.sqlite"),
            web_host: "0.0.0.0".to_string(),
            web_port: 8080,
            page_size: 20,
            search_api_url: None,
            search_api_timeout: Duration::from_secs(15),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = Config {
            database_path: PathBuf::from("x"),
            web_host: "0.0.0.0".to_string(),
            web_port: 8080,
            page_size: 0,
            search_api_url: None,
            search_api_timeout: Duration::from_secs(15),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_api_url() {
        let config = Config {
            database_path: PathBuf::from("x"),
            web_host: "0.0.0.0".to_string(),
            web_port: 8080,
            page_size: 20,
            search_api_url: Some("ftp://example.com".to_string()),
            search_api_timeout: Duration::from_secs(15),
        };
        assert!(config.validate().is_err());
    }
}
