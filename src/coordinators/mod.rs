// Coordinators layer - Workflow orchestration
//
// Coordinators handle pure workflow orchestration by composing provider operations
// for specific API endpoints. They determine the sequence of operations without
// containing business logic themselves.
//
// Every operation runs the same pipeline: policy precheck, target existence,
// full policy decision, validation, then the repository call. Nothing is
// written before all checks pass.

pub mod game_coordinator;
pub mod play_coordinator;
pub mod user_coordinator;

pub use game_coordinator::{GameCoordinator, GameListParams};
pub use play_coordinator::{PlayCoordinator, PlayListParams};
pub use user_coordinator::UserCoordinator;

use crate::errors::AccessError;
use crate::providers::AuthorizationProvider;
use crate::types::internal::RequestContext;
use crate::types::internal::access::{Action, Decision, Resource, ResourceKind};
use crate::types::internal::validation::FieldError;

/// Shared policy plumbing for the resource coordinators
pub trait Coordinator {
    fn authorization(&self) -> &AuthorizationProvider;

    /// Target-independent checks, run before the target is looked up
    fn precheck(
        &self,
        ctx: &RequestContext,
        action: &Action,
        kind: ResourceKind,
    ) -> Result<(), AccessError> {
        match self.authorization().precheck(&ctx.actor, action, kind) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                tracing::warn!(
                    request_id = %ctx.request_id,
                    actor = %ctx.actor,
                    resource = %kind,
                    ?action,
                    ?reason,
                    token_failure = ?ctx.auth_failure,
                    "Request denied"
                );
                Err(reason.into())
            }
        }
    }

    /// Full policy decision on a resolved target
    fn authorize(
        &self,
        ctx: &RequestContext,
        action: &Action,
        resource: &Resource,
    ) -> Result<(), AccessError> {
        match self.authorization().decide(&ctx.actor, action, resource) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                tracing::warn!(
                    request_id = %ctx.request_id,
                    actor = %ctx.actor,
                    ?resource,
                    ?action,
                    ?reason,
                    "Request denied"
                );
                Err(reason.into())
            }
        }
    }

    /// Turn a non-empty validation result into a 422
    fn ensure_valid(&self, ctx: &RequestContext, errors: Vec<FieldError>) -> Result<(), AccessError> {
        if errors.is_empty() {
            return Ok(());
        }
        tracing::debug!(request_id = %ctx.request_id, failures = errors.len(), "Validation failed");
        Err(AccessError::UnprocessableEntity(errors))
    }
}
