use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{EnvironmentProvider, SystemEnvironment};

/// Startup failure while loading a secret
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: &'static str },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength {
        secret_name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// An environment variable holding a secret, and its minimum length
struct SecretVar {
    name: &'static str,
    min_length: usize,
}

const JWT_SECRET: SecretVar = SecretVar {
    name: "JWT_SECRET",
    min_length: SecretManager::JWT_SECRET_MIN_LENGTH,
};

const PASSWORD_PEPPER: SecretVar = SecretVar {
    name: "PASSWORD_PEPPER",
    min_length: SecretManager::PEPPER_MIN_LENGTH,
};

impl SecretVar {
    fn load(&self, env_provider: &dyn EnvironmentProvider) -> Result<String, SecretError> {
        let value = env_provider.get_var(self.name).ok_or(SecretError::Missing {
            secret_name: self.name,
        })?;

        if value.len() < self.min_length {
            return Err(SecretError::InvalidLength {
                secret_name: self.name,
                expected: self.min_length,
                actual: value.len(),
            });
        }

        Ok(value)
    }
}

/// Holds the token signing key and the password pepper
///
/// Both are required at startup; nothing runs with a missing or short secret.
pub struct SecretManager {
    jwt_secret: String,
    pepper: String,
}

impl SecretManager {
    pub const JWT_SECRET_MIN_LENGTH: usize = 32;
    pub const PEPPER_MIN_LENGTH: usize = 16;

    /// Build from already-known values, without length checks
    pub fn new(jwt_secret: impl Into<String>, pepper: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            pepper: pepper.into(),
        }
    }

    /// Load secrets from the process environment
    ///
    /// # Errors
    /// Returns `SecretError` if any secret is missing or too short
    pub fn init() -> Result<Self, SecretError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, SecretError> {
        let jwt_secret = JWT_SECRET.load(env_provider.as_ref())?;
        let pepper = PASSWORD_PEPPER.load(env_provider.as_ref())?;

        Ok(Self { jwt_secret, pepper })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn pepper(&self) -> &str {
        &self.pepper
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("pepper", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 2 }}")
    }
}
