use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::SecretManager;
use crate::errors::{InternalError, TokenError};
use crate::stores::CredentialStore;
use crate::types::internal::auth::{AuthenticatedUser, Claims, Role};

/// A freshly minted session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    /// Unix timestamp after which the token is rejected
    pub expires_at: i64,
}

/// Issues and validates HS256 session tokens
///
/// Tokens only carry the subject. The role is looked up on every
/// validation, and a deleted subject makes every token it ever had invalid.
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
    credential_store: Arc<CredentialStore>,
    ttl_seconds: i64,
}

impl TokenProvider {
    pub fn new(
        secret_manager: Arc<SecretManager>,
        credential_store: Arc<CredentialStore>,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            secret_manager,
            credential_store,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a token for `user_id` with the configured lifetime
    pub fn issue(&self, user_id: i64) -> Result<IssuedToken, InternalError> {
        self.issue_with_lifetime(user_id, self.ttl_seconds)
    }

    /// Issue a token with an explicit lifetime in seconds
    ///
    /// A zero or negative lifetime yields a correctly signed token that is
    /// already expired.
    pub fn issue_with_lifetime(
        &self,
        user_id: i64,
        lifetime_seconds: i64,
    ) -> Result<IssuedToken, InternalError> {
        let now = Utc::now().timestamp();
        let expires_at = now + lifetime_seconds;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))?;

        tracing::debug!(user_id, jti = %claims.jti, expires_at, "Token issued");

        Ok(IssuedToken { token, expires_at })
    }

    /// Decode and verify the signature, without judging expiry or subject
    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against our own clock with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Token decode failed: {}", e);
            TokenError::Malformed
        })
    }

    /// Validate a token and resolve its subject
    ///
    /// # Returns
    /// * `Ok(AuthenticatedUser)` - with the subject's current role
    /// * `Err(InternalError::Token(Malformed | Expired | UnknownSubject))` - token rejected
    /// * `Err(InternalError)` - storage failure while resolving the subject
    pub async fn validate(&self, token: &str) -> Result<AuthenticatedUser, InternalError> {
        let claims = self.decode_claims(token)?;

        let user_id: i64 = claims.sub.parse().map_err(|_| TokenError::Malformed)?;

        if Utc::now().timestamp() >= claims.exp {
            return Err(TokenError::Expired.into());
        }

        let user = self
            .credential_store
            .get_user_by_id(user_id)
            .await?
            .ok_or(TokenError::UnknownSubject)?;

        let role: Role = user.role.parse()?;

        Ok(AuthenticatedUser { user_id, role })
    }
}
