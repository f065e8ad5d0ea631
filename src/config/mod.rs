//! Configuration loading and management
//!
//! Settings come from an optional YAML file, then environment variables
//! (`HBNB_*`) override individual values. Everything has a default except
//! the JWT secret, which is only optional in development.

use crate::core::JwtKeys;
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Secret used when running in development without `jwt_secret`
const DEVELOPMENT_SECRET: &str = "hbnb-development-secret";

/// Longest accepted token lifetime (100 years)
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 100;

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "testing" => Ok(Environment::Testing),
            "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue {
                field: "environment".to_string(),
                value: s.to_string(),
                message: "expected development, testing or production".to_string(),
            }),
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(ConfigError::InvalidValue {
                field: "storage.backend".to_string(),
                value: s.to_string(),
                message: "expected memory or sqlite".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Option<String>,

    /// Access token lifetime
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_hours: 48,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Only used by the sqlite backend
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            database_url: "sqlite://hbnb.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Full startup sequence: optional file, process environment, validation
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override values from `HBNB_*` variables resolved through `lookup`
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(environment) = lookup("HBNB_ENV") {
            self.environment = environment.parse()?;
        }
        if let Some(host) = lookup("HBNB_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("HBNB_PORT") {
            self.server.port = parse_number("HBNB_PORT", &port)?;
        }
        if let Some(secret) = lookup("HBNB_JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Some(ttl) = lookup("HBNB_TOKEN_TTL_HOURS") {
            self.auth.token_ttl_hours = parse_number("HBNB_TOKEN_TTL_HOURS", &ttl)?;
        }
        if let Some(backend) = lookup("HBNB_STORAGE") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(url) = lookup("HBNB_DATABASE_URL") {
            self.storage.database_url = url;
        }
        if let Some(filter) = lookup("HBNB_LOG") {
            self.logging.filter = filter;
        }
        Ok(())
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.auth.token_ttl_hours) {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_hours".to_string(),
                value: self.auth.token_ttl_hours.to_string(),
                message: format!("must be between 1 and {}", MAX_TOKEN_TTL_HOURS),
            });
        }

        let has_secret = self
            .auth
            .jwt_secret
            .as_deref()
            .is_some_and(|s| !s.is_empty());
        if !has_secret && self.environment != Environment::Development {
            return Err(ConfigError::MissingField {
                field: "auth.jwt_secret".to_string(),
                message: "required outside development (set HBNB_JWT_SECRET)".to_string(),
            });
        }

        Ok(())
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Token keys from the configured secret and lifetime
    pub fn jwt_keys(&self) -> Result<JwtKeys, ConfigError> {
        self.validate()?;
        let secret = match self.auth.jwt_secret.as_deref() {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("no JWT secret configured, using the development secret");
                DEVELOPMENT_SECRET
            }
        };
        Ok(JwtKeys::new(
            secret.as_bytes(),
            chrono::Duration::hours(self.auth.token_ttl_hours),
        ))
    }
}

fn parse_number<N: FromStr>(field: &str, value: &str) -> Result<N, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: "not a valid number".to_string(),
    })
}
