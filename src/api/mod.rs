// API layer - HTTP endpoints
pub mod game;
pub mod health;
pub mod play;
pub mod user;

pub use game::GameApi;
pub use health::HealthApi;
pub use play::PlayApi;
pub use user::UserApi;

use poem::Request;

use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::internal::RequestContext;

/// Shared behaviour for endpoint groups
pub(crate) trait Api {
    fn token_provider(&self) -> &TokenProvider;

    /// Build the request context from the Authorization header
    ///
    /// A bad token does not fail here; the coordinator decides whether the
    /// action needed an identity.
    async fn request_context(&self, req: &Request) -> Result<RequestContext, ApiError> {
        let ctx = RequestContext::from_request(req, self.token_provider()).await?;
        tracing::debug!(
            request_id = %ctx.request_id,
            method = %req.method(),
            path = %req.uri().path(),
            actor = %ctx.actor,
            "Request received"
        );
        Ok(ctx)
    }
}
