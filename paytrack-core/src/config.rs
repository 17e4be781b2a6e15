use std::path::PathBuf;

use thiserror::Error;

use crate::engine::DEFAULT_LATE_THRESHOLD_DAYS;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration for the server and the report CLI.
///
/// Every field has a default so the service starts with an empty
/// environment, reading `cleaned_invoices.csv` from the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind to (`SERVER_HOST`)
    pub host: String,

    /// Port to listen on (`SERVER_PORT`)
    pub port: u16,

    /// CSV file with one invoice per row (`INVOICE_CSV_PATH`)
    pub csv_path: PathBuf,

    /// Invoices paid after more days than this are late (`LATE_THRESHOLD_DAYS`)
    pub late_threshold_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            csv_path: PathBuf::from("cleaned_invoices.csv"),
            late_threshold_days: DEFAULT_LATE_THRESHOLD_DAYS,
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// Call `dotenv().ok()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults; set but unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("SERVER_HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("SERVER_PORT") {
            config.port = port.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "SERVER_PORT",
                value: port.clone(),
            })?;
        }

        if let Some(path) = lookup("INVOICE_CSV_PATH") {
            config.csv_path = PathBuf::from(path);
        }

        if let Some(days) = lookup("LATE_THRESHOLD_DAYS") {
            config.late_threshold_days = days
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|d| *d >= 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "LATE_THRESHOLD_DAYS",
                    value: days.clone(),
                })?;
        }

        Ok(config)
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(|_| None).expect("defaults should load");

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.late_threshold_days, 30);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8080"),
            ("INVOICE_CSV_PATH", "/data/invoices.csv"),
            ("LATE_THRESHOLD_DAYS", "45"),
        ]))
        .expect("config should load");

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.csv_path, PathBuf::from("/data/invoices.csv"));
        assert_eq!(config.late_threshold_days, 45);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "http")]))
            .expect_err("port must be numeric");

        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "SERVER_PORT",
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[("LATE_THRESHOLD_DAYS", "-1")]));

        assert!(result.is_err());
    }
}
