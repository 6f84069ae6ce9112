use std::sync::Arc;

use crate::AppData;
use crate::coordinators::Coordinator;
use crate::errors::AccessError;
use crate::providers::{AuthorizationProvider, ValidationProvider};
use crate::stores::{CredentialStore, NewPlay, PlayStore};
use crate::types::dto::play::{CreatePlayRequest, PlayResponse};
use crate::types::internal::RequestContext;
use crate::types::internal::access::{Action, Resource, ResourceKind};

/// Raw listing parameters as they arrive from the query string
#[derive(Debug, Clone, Default)]
pub struct PlayListParams {
    pub order: Option<String>,
    pub order_type: Option<String>,
    pub game: Option<i64>,
    pub from_date: Option<i64>,
    pub to_date: Option<i64>,
    pub search: Option<String>,
}

/// Handles the per-user play log
pub struct PlayCoordinator {
    credential_store: Arc<CredentialStore>,
    play_store: Arc<PlayStore>,
    validation_provider: Arc<ValidationProvider>,
    authorization_provider: Arc<AuthorizationProvider>,
}

impl Coordinator for PlayCoordinator {
    fn authorization(&self) -> &AuthorizationProvider {
        &self.authorization_provider
    }
}

impl PlayCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: Arc::clone(&app_data.credential_store),
            play_store: Arc::clone(&app_data.play_store),
            validation_provider: Arc::clone(&app_data.validation_provider),
            authorization_provider: Arc::clone(&app_data.authorization_provider),
        }
    }

    /// The owning user must exist before anything under it can be addressed
    async fn ensure_owner_exists(&self, owner_id: i64) -> Result<(), AccessError> {
        match self.credential_store.get_user_by_id(owner_id).await? {
            Some(_) => Ok(()),
            None => Err(AccessError::NotFound),
        }
    }

    /// Record a play for `owner_id`; the owner or a power user may do this
    pub async fn create_play(
        &self,
        ctx: &RequestContext,
        owner_id: i64,
        request: CreatePlayRequest,
    ) -> Result<PlayResponse, AccessError> {
        self.precheck(ctx, &Action::CREATE, ResourceKind::Play)?;
        self.ensure_owner_exists(owner_id).await?;
        self.authorize(ctx, &Action::CREATE, &Resource::Play { owner_id, play_id: None })?;

        let name = request.name.trim().to_string();
        let errors = self
            .validation_provider
            .validate_new_play(
                &name,
                request.game_id,
                request.played_at,
                request.additional_data.as_ref(),
            )
            .await?;
        self.ensure_valid(ctx, errors)?;

        // Validation guarantees all three are present
        let (Some(game_id), Some(played_at), Some(additional_data)) =
            (request.game_id, request.played_at, request.additional_data)
        else {
            return Err(AccessError::field("game_id", "is required"));
        };

        let stored = self
            .play_store
            .add_play(NewPlay {
                user_id: owner_id,
                game_id,
                name,
                additional_data,
                played_at,
            })
            .await?;

        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor, play_id = stored.id, owner_id, "Play created");

        Ok(PlayResponse::try_from(stored)?)
    }

    pub async fn get_play(
        &self,
        ctx: &RequestContext,
        owner_id: i64,
        play_id: i64,
    ) -> Result<PlayResponse, AccessError> {
        self.precheck(ctx, &Action::Read, ResourceKind::Play)?;
        let play = self
            .play_store
            .get_play(owner_id, play_id)
            .await?
            .ok_or(AccessError::NotFound)?;
        self.authorize(ctx, &Action::Read, &Resource::Play { owner_id, play_id: Some(play_id) })?;

        Ok(PlayResponse::try_from(play)?)
    }

    pub async fn list_plays(
        &self,
        ctx: &RequestContext,
        owner_id: i64,
        params: PlayListParams,
    ) -> Result<Vec<PlayResponse>, AccessError> {
        self.precheck(ctx, &Action::Read, ResourceKind::Play)?;
        self.ensure_owner_exists(owner_id).await?;
        self.authorize(ctx, &Action::Read, &Resource::Play { owner_id, play_id: None })?;

        let query = self
            .validation_provider
            .play_query(
                params.order.as_deref(),
                params.order_type.as_deref(),
                params.game,
                params.from_date,
                params.to_date,
                params.search,
            )
            .map_err(AccessError::UnprocessableEntity)?;

        self.play_store
            .list_plays(owner_id, &query)
            .await?
            .into_iter()
            .map(|p| PlayResponse::try_from(p).map_err(AccessError::from))
            .collect()
    }

    /// Plays are immutable; always MethodNotSupported
    pub async fn update_play(
        &self,
        ctx: &RequestContext,
        owner_id: i64,
        play_id: i64,
    ) -> Result<PlayResponse, AccessError> {
        self.precheck(ctx, &Action::UPDATE, ResourceKind::Play)?;
        self.authorize(ctx, &Action::UPDATE, &Resource::Play { owner_id, play_id: Some(play_id) })?;
        Err(AccessError::MethodNotSupported)
    }

    /// Plays cannot be removed; always MethodNotSupported
    pub async fn delete_play(
        &self,
        ctx: &RequestContext,
        owner_id: i64,
        play_id: i64,
    ) -> Result<PlayResponse, AccessError> {
        self.precheck(ctx, &Action::Delete, ResourceKind::Play)?;
        self.authorize(ctx, &Action::Delete, &Resource::Play { owner_id, play_id: Some(play_id) })?;
        Err(AccessError::MethodNotSupported)
    }
}
