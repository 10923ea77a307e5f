//! Configuration
//!
//! Read from a TOML file, by default `~/.config/inside-tunisia/config.toml`.
//! Every section and key is optional; absent values take the defaults below.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [security]
//! session_ttl_seconds = 3600
//!
//! [uploads]
//! dir = "./uploads"
//! max_cv_bytes = 5242880
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::application::guide::DEFAULT_MAX_CV_BYTES;
use crate::infrastructure::crypto::password;
use crate::infrastructure::DatabaseConfig;
use crate::interfaces::http::ServiceSettings;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "INSIDE_TUNISIA_CONFIG";

/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub uploads: UploadConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DatabaseConfig::default().url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Absolute session lifetime, no sliding renewal
    pub session_ttl_seconds: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: 3600,
            bcrypt_cost: password::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_cv_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./uploads"),
            max_cv_bytes: DEFAULT_MAX_CV_BYTES,
        }
    }
}

/// Account created at startup when no administrator exists
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            full_name: "Administrator".to_string(),
            email: "admin@insidetunisia.tn".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if !(1..=MAX_SESSION_TTL_SECONDS).contains(&self.security.session_ttl_seconds) {
            return Err(ConfigError::Invalid(format!(
                "security.session_ttl_seconds must be between 1 and {}",
                MAX_SESSION_TTL_SECONDS
            )));
        }
        if !(password::MIN_COST..=password::MAX_COST).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "security.bcrypt_cost must be between {} and {}",
                password::MIN_COST,
                password::MAX_COST
            )));
        }
        if self.uploads.max_cv_bytes == 0 {
            return Err(ConfigError::Invalid("uploads.max_cv_bytes must be non-zero".into()));
        }
        Ok(())
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
        }
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            session_ttl: chrono::Duration::seconds(self.security.session_ttl_seconds),
            bcrypt_cost: self.security.bcrypt_cost,
            max_cv_bytes: self.uploads.max_cv_bytes,
        }
    }
}

/// `$INSIDE_TUNISIA_CONFIG`, else `~/.config/inside-tunisia/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inside-tunisia")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.security.session_ttl_seconds, 3600);
        assert_eq!(cfg.uploads.max_cv_bytes, 5 * 1024 * 1024);
        assert_eq!(cfg.logging.format, "text");
        assert!(cfg.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [security]
            session_ttl_seconds = 600
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.security.session_ttl_seconds, 600);
        assert_eq!(cfg.security.bcrypt_cost, password::DEFAULT_COST);
        assert_eq!(cfg.service_settings().session_ttl, chrono::Duration::minutes(10));
    }

    #[test]
    fn non_positive_ttl_is_rejected() {
        let err = AppConfig::from_toml("[security]\nsession_ttl_seconds = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn ttl_beyond_one_year_is_rejected() {
        let err = AppConfig::from_toml("[security]\nsession_ttl_seconds = 9223372036854775807")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let raw = format!("[security]\nsession_ttl_seconds = {}", MAX_SESSION_TTL_SECONDS);
        let cfg = AppConfig::from_toml(&raw).unwrap();
        assert_eq!(cfg.service_settings().session_ttl, chrono::Duration::days(365));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[server\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("inside-tunisia-no-such-config.toml");
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn address_joins_host_and_port() {
        let server = ServerConfig {
            host: "127.0.0.1".into(),
            port: 3000,
            shutdown_timeout: 5,
        };
        assert_eq!(server.address(), "127.0.0.1:3000");
    }
}
