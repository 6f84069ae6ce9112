use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};

use crate::{
    errors::{InternalError, TokenError},
    providers::TokenProvider,
    types::internal::auth::{Actor, AuthenticatedUser},
};

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carries the resolved actor for the policy checks and the request id used
/// to correlate log lines across the API, coordinator and store layers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API or CLI)
    pub source: RequestSource,

    /// Who is acting; anonymous when no usable token was presented
    pub actor: Actor,

    /// Why a presented token was rejected, if one was
    pub auth_failure: Option<TokenError>,
}

impl RequestContext {
    /// Context for a request without any credentials
    pub fn anonymous() -> Self {
        Self {
            request_id: RequestId::new(),
            source: RequestSource::API,
            actor: Actor::Anonymous,
            auth_failure: None,
        }
    }

    /// Context for an already-resolved identity
    pub fn for_user(user: AuthenticatedUser) -> Self {
        Self {
            actor: Actor::User(user),
            ..Self::anonymous()
        }
    }

    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        tracing::debug!(command = command_name, "CLI request context created");
        Self {
            source: RequestSource::CLI,
            ..Self::anonymous()
        }
    }

    /// Create RequestContext from the incoming HTTP request
    ///
    /// Should be called at the beginning of every endpoint. A missing
    /// Authorization header yields an anonymous context.
    pub async fn from_request(
        req: &Request,
        token_provider: &TokenProvider,
    ) -> Result<Self, InternalError> {
        let bearer = Bearer::from_request(req).ok();
        Self::from_bearer(bearer.as_ref().map(|b| b.token.as_str()), token_provider).await
    }

    /// Resolve the actor from an optional raw bearer token
    ///
    /// Invalid, expired and zombie tokens do not fail the request here. The
    /// actor stays anonymous and the failure is kept so the policy can turn it
    /// into a 401 when the action needs an identity.
    pub async fn from_bearer(
        token: Option<&str>,
        token_provider: &TokenProvider,
    ) -> Result<Self, InternalError> {
        let mut ctx = Self::anonymous();

        let Some(token) = token else {
            return Ok(ctx);
        };

        match token_provider.validate(token).await {
            Ok(user) => {
                ctx.actor = Actor::User(user);
            }
            Err(InternalError::Token(failure)) => {
                tracing::debug!(request_id = %ctx.request_id, reason = %failure, "Bearer token rejected");
                ctx.auth_failure = Some(failure);
            }
            Err(e) => return Err(e),
        }

        tracing::trace!("Request context created: {:?}", ctx);
        Ok(ctx)
    }

    /// Set the actor
    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = actor;
        self
    }
}
