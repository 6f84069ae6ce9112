use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};

use crate::errors::InternalError;

/// Password hashing provider
///
/// Hashes with Argon2id, keyed with the application pepper as the Argon2
/// secret parameter. Hashes are PHC strings; the pepper is not stored in them.
pub struct CryptoProvider {
    pepper: String,
    params: Params,
}

impl CryptoProvider {
    /// Create a CryptoProvider with the default Argon2 cost parameters
    pub fn new(pepper: impl Into<String>) -> Self {
        Self::with_params(pepper, Params::default())
    }

    /// Create a CryptoProvider with explicit cost parameters (tests lower them)
    pub fn with_params(pepper: impl Into<String>, params: Params) -> Self {
        Self {
            pepper: pepper.into(),
            params,
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a plaintext password into a PHC string
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
            .to_string();

        Ok(hash)
    }

    /// Check a plaintext password against a stored PHC string
    ///
    /// # Returns
    /// * `Ok(true)` - password matches
    /// * `Ok(false)` - password does not match
    /// * `Err(InternalError)` - stored hash is unreadable or Argon2 failed to initialize
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, InternalError> {
        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|e| InternalError::crypto("password_hash_parse", e.to_string()))?;

        match self.argon2()?.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(InternalError::crypto("password_verify", e.to_string())),
        }
    }
}
