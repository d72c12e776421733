// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup into
//! [`AppConfig`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `TLS_CERT_PATH` | PEM certificate chain; enables HTTPS with `TLS_KEY_PATH` | unset |
//! | `TLS_KEY_PATH` | PEM private key | unset |
//! | `ADMIN_API_TOKEN` | Bearer token for `/v1/admin/*` routes | unset (admin disabled) |
//! | `OFFRAMP_DISABLED_PROVIDERS` | Comma separated provider ids to start disabled | empty |

use std::{env, net::SocketAddr, path::PathBuf};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const RUST_LOG_ENV: &str = "RUST_LOG";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const ADMIN_API_TOKEN_ENV: &str = "ADMIN_API_TOKEN";
pub const OFFRAMP_DISABLED_PROVIDERS_ENV: &str = "OFFRAMP_DISABLED_PROVIDERS";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a port number, got `{0}`")]
    InvalidPort(String),

    #[error("LOG_FORMAT must be `json` or `pretty`, got `{0}`")]
    InvalidLogFormat(String),

    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    IncompleteTls,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::InvalidLogFormat(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Offramp registry settings applied by the initializer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfframpConfig {
    /// Provider ids registered but switched off at boot.
    pub disabled_providers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub log_filter: String,
    pub tls: Option<TlsConfig>,
    pub admin_api_token: Option<String>,
    pub offramp: OfframpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            tls: None,
            admin_api_token: None,
            offramp: OfframpConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };
        let log_format = match get(LOG_FORMAT_ENV) {
            Some(raw) => LogFormat::parse(&raw)?,
            None => LogFormat::default(),
        };
        let log_filter = get(RUST_LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        let disabled_providers = get(OFFRAMP_DISABLED_PROVIDERS_ENV)
            .map(|raw| {
                raw.split(',')
                    .map(|id| id.trim().to_ascii_lowercase())
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            log_format,
            log_filter,
            tls,
            admin_api_token: get(ADMIN_API_TOKEN_ENV),
            offramp: OfframpConfig { disabled_providers },
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ConfigError::InvalidBindAddress(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn reads_all_values() {
        let config = config_from(&[
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9090"),
            (LOG_FORMAT_ENV, "JSON"),
            (RUST_LOG_ENV, "debug"),
            (TLS_CERT_PATH_ENV, "/certs/cert.pem"),
            (TLS_KEY_PATH_ENV, "/certs/key.pem"),
            (ADMIN_API_TOKEN_ENV, "s3cret"),
            (OFFRAMP_DISABLED_PROVIDERS_ENV, " IDRX, ,payramp "),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9090");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(
            config.tls.as_ref().map(|tls| tls.key_path.clone()),
            Some(PathBuf::from("/certs/key.pem"))
        );
        assert_eq!(config.admin_api_token.as_deref(), Some("s3cret"));
        assert_eq!(config.offramp.disabled_providers, ["idrx", "payramp"]);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = config_from(&[(ADMIN_API_TOKEN_ENV, "  "), (PORT_ENV, "")]).unwrap();
        assert!(config.admin_api_token.is_none());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn rejects_bad_port() {
        assert_eq!(
            config_from(&[(PORT_ENV, "http")]).unwrap_err(),
            ConfigError::InvalidPort("http".to_string())
        );
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(matches!(
            config_from(&[(LOG_FORMAT_ENV, "xml")]),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn tls_needs_both_paths() {
        assert_eq!(
            config_from(&[(TLS_CERT_PATH_ENV, "/certs/cert.pem")]).unwrap_err(),
            ConfigError::IncompleteTls
        );
    }

    #[test]
    fn bad_host_is_reported() {
        let config = config_from(&[(HOST_ENV, "not a host")]).unwrap();
        assert!(matches!(
            config.bind_addr(),
            Err(ConfigError::InvalidBindAddress(_))
        ));
    }
}
