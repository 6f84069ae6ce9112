use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::errors::ApplicationError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://boardplay.db?mode=rwc";
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Bootstrap settings for infrastructure configuration
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    token_ttl_seconds: i64,
}

impl BootstrapSettings {
    /// Load bootstrap settings from environment variables, falling back to defaults
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url = Self::load(env_provider.as_ref(), "DATABASE_URL", DEFAULT_DATABASE_URL);
        if database_url.trim().is_empty() {
            return Err(ApplicationError::InvalidSetting {
                setting_name: "DATABASE_URL".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let server_host = Self::load(env_provider.as_ref(), "HOST", "0.0.0.0");
        if server_host.trim().is_empty() {
            return Err(ApplicationError::InvalidSetting {
                setting_name: "HOST".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let server_port: u16 = Self::parse(env_provider.as_ref(), "PORT", "3000")?;
        if server_port == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: "PORT".to_string(),
                reason: "must be between 1 and 65535".to_string(),
            });
        }

        let token_ttl_seconds: i64 = Self::parse(
            env_provider.as_ref(),
            "TOKEN_TTL_SECONDS",
            &DEFAULT_TOKEN_TTL_SECONDS.to_string(),
        )?;
        if token_ttl_seconds <= 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: "TOKEN_TTL_SECONDS".to_string(),
                reason: "must be a positive number of seconds".to_string(),
            });
        }

        Ok(Self {
            database_url,
            server_host,
            server_port,
            token_ttl_seconds,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    fn load(env_provider: &(dyn EnvironmentProvider + Send + Sync), key: &str, default: &str) -> String {
        env_provider.get_var_or(key, default)
    }

    fn parse<T>(
        env_provider: &(dyn EnvironmentProvider + Send + Sync),
        key: &str,
        default: &str,
    ) -> Result<T, ApplicationError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = Self::load(env_provider, key, default);
        raw.trim()
            .parse::<T>()
            .map_err(|e| ApplicationError::ParseError {
                setting_name: key.to_string(),
                error: format!("'{}': {}", raw, e),
            })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_seconds
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}
