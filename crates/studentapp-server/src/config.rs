use std::net::SocketAddr;
use std::path::PathBuf;

/// Output format of the stdout log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup. Unset and empty values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url =
            get("DATABASE_URL").unwrap_or_else(|| "sqlite://studentapp.db".to_string());

        let listen_addr = get("STUDENTAPP_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("STUDENTAPP_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let max_connections = match get("STUDENTAPP_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid(
                    "STUDENTAPP_MAX_CONNECTIONS",
                    "must be a positive integer",
                ))?,
            None => 10,
        };

        let log_format = match get("STUDENTAPP_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(_) => {
                return Err(ConfigError::Invalid(
                    "STUDENTAPP_LOG_FORMAT",
                    "must be \"text\" or \"json\"",
                ))
            }
        };

        let log_file = get("STUDENTAPP_LOG_FILE").map(PathBuf::from);

        Ok(Config {
            listen_addr,
            database_url,
            max_connections,
            log_format,
            log_file,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url, "sqlite://studentapp.db");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("STUDENTAPP_LISTEN_ADDR", "127.0.0.1:8080"),
            ("STUDENTAPP_MAX_CONNECTIONS", "4"),
            ("STUDENTAPP_LOG_FORMAT", "json"),
            ("STUDENTAPP_LOG_FILE", "logs/studentapp.log"),
        ])
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.log_file,
            Some(PathBuf::from("logs/studentapp.log"))
        );
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = load(&[("STUDENTAPP_LISTEN_ADDR", ""), ("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.database_url, "sqlite://studentapp.db");
    }

    #[test]
    fn test_invalid_listen_addr() {
        let err = load(&[("STUDENTAPP_LISTEN_ADDR", "not-an-address")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for STUDENTAPP_LISTEN_ADDR: must be a valid socket address"
        );
    }

    #[test]
    fn test_invalid_max_connections() {
        assert!(load(&[("STUDENTAPP_MAX_CONNECTIONS", "0")]).is_err());
        assert!(load(&[("STUDENTAPP_MAX_CONNECTIONS", "many")]).is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        assert!(load(&[("STUDENTAPP_LOG_FORMAT", "xml")]).is_err());
    }
}
