use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_HOST: &str = "127.0.0.1";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_STATIC_DIR: &str = "apps/domain-portfolio/service/static";
const PRODUCTION_ENV: &str = "production";

/// How the process hosts the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    /// The binary binds `bind_addr` and serves requests itself.
    Standalone,
    /// An external host drives the exported router; nothing binds a socket.
    Embedded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub deployment_mode: DeploymentMode,
    pub log_filter: String,
    pub log_format: LogFormat,
    pub static_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value '{value}': {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
    #[error("invalid PORTFOLIO_BIND_HOST value '{value}': {source}")]
    InvalidBindHost {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid PORTFOLIO_BIND_ADDR value '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid PORTFOLIO_LOG_FORMAT value '{value}' (expected 'text' or 'json')")]
    InvalidLogFormat { value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = match read("PORTFOLIO_BIND_ADDR") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr { value: raw, source })?,
            None => {
                let port = match read("PORT") {
                    Some(raw) => raw
                        .trim()
                        .parse::<u16>()
                        .map_err(|source| ConfigError::InvalidPort { value: raw, source })?,
                    None => DEFAULT_PORT,
                };
                let host_raw =
                    read("PORTFOLIO_BIND_HOST").unwrap_or_else(|| DEFAULT_BIND_HOST.to_string());
                let host = host_raw
                    .trim()
                    .parse::<IpAddr>()
                    .map_err(|source| ConfigError::InvalidBindHost {
                        value: host_raw.clone(),
                        source,
                    })?;
                SocketAddr::new(host, port)
            }
        };

        let deployment_mode = match read("PORTFOLIO_ENV") {
            Some(value) if value.trim().eq_ignore_ascii_case(PRODUCTION_ENV) => {
                DeploymentMode::Embedded
            }
            _ => DeploymentMode::Standalone,
        };

        let log_filter = read("PORTFOLIO_LOG_FILTER").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let log_format = match read("PORTFOLIO_LOG_FORMAT") {
            None => LogFormat::Text,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::InvalidLogFormat { value }),
            },
        };

        let static_dir = read("PORTFOLIO_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            bind_addr,
            deployment_mode,
            log_filter,
            log_format,
            static_dir,
        })
    }

    pub fn for_tests(static_dir: PathBuf) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            deployment_mode: DeploymentMode::Standalone,
            log_filter: "debug".to_string(),
            log_format: LogFormat::Text,
            static_dir,
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.deployment_mode == DeploymentMode::Embedded
    }
}
