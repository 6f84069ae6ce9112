use crate::errors::InternalError;
use crate::providers::TokenProvider;

/// How far in the past the minted token expired
const EXPIRED_BY_SECONDS: i64 = 60;

/// Mint a correctly signed token for `user_id` that is already expired
pub fn mint_expired_token(token_provider: &TokenProvider, user_id: i64) -> Result<String, InternalError> {
    let issued = token_provider.issue_with_lifetime(user_id, -EXPIRED_BY_SECONDS)?;
    tracing::info!(user_id, expires_at = issued.expires_at, "Minted expired token");
    Ok(issued.token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TokenError;
    use crate::test::utils::{new_user, setup_test_app};

    #[tokio::test]
    async fn test_minted_token_is_rejected_as_expired() {
        let app = setup_test_app().await;
        let alice = app.credential_store.add_user(new_user("alice")).await.unwrap();

        let token = mint_expired_token(&app.token_provider, alice.id).unwrap();

        assert!(matches!(
            app.token_provider.validate(&token).await,
            Err(InternalError::Token(TokenError::Expired))
        ));
    }
}
