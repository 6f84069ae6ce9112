use std::sync::Arc;

use crate::AppData;
use crate::coordinators::Coordinator;
use crate::errors::AccessError;
use crate::providers::{AuthorizationProvider, ValidationProvider};
use crate::stores::{GameStore, NewGame};
use crate::types::dto::game::{CreateGameRequest, GameResponse};
use crate::types::internal::RequestContext;
use crate::types::internal::access::{Action, Resource, ResourceKind};

/// Raw listing parameters as they arrive from the query string
#[derive(Debug, Clone, Default)]
pub struct GameListParams {
    pub order: Option<String>,
    pub order_type: Option<String>,
    pub search: Option<String>,
}

/// Handles the game catalogue
pub struct GameCoordinator {
    game_store: Arc<GameStore>,
    validation_provider: Arc<ValidationProvider>,
    authorization_provider: Arc<AuthorizationProvider>,
}

impl Coordinator for GameCoordinator {
    fn authorization(&self) -> &AuthorizationProvider {
        &self.authorization_provider
    }
}

impl GameCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            game_store: Arc::clone(&app_data.game_store),
            validation_provider: Arc::clone(&app_data.validation_provider),
            authorization_provider: Arc::clone(&app_data.authorization_provider),
        }
    }

    /// Add a game; power users only
    pub async fn create_game(
        &self,
        ctx: &RequestContext,
        request: CreateGameRequest,
    ) -> Result<GameResponse, AccessError> {
        self.precheck(ctx, &Action::CREATE, ResourceKind::Game)?;
        self.authorize(ctx, &Action::CREATE, &Resource::Game { game_id: None })?;

        let new_game = NewGame {
            name: request.name.trim().to_string(),
            designers: request.designers,
            cover: request.cover,
        };
        let errors = self.validation_provider.validate_new_game(&new_game);
        self.ensure_valid(ctx, errors)?;

        let stored = self.game_store.add_game(new_game).await?;

        Ok(GameResponse::try_from(stored)?)
    }

    pub async fn get_game(&self, ctx: &RequestContext, game_id: i64) -> Result<GameResponse, AccessError> {
        self.precheck(ctx, &Action::Read, ResourceKind::Game)?;
        let game = self
            .game_store
            .get_game(game_id)
            .await?
            .ok_or(AccessError::NotFound)?;
        self.authorize(ctx, &Action::Read, &Resource::Game { game_id: Some(game_id) })?;

        Ok(GameResponse::try_from(game)?)
    }

    pub async fn list_games(
        &self,
        ctx: &RequestContext,
        params: GameListParams,
    ) -> Result<Vec<GameResponse>, AccessError> {
        self.precheck(ctx, &Action::Read, ResourceKind::Game)?;
        self.authorize(ctx, &Action::Read, &Resource::Game { game_id: None })?;

        let query = self
            .validation_provider
            .game_query(params.order.as_deref(), params.order_type.as_deref(), params.search)
            .map_err(AccessError::UnprocessableEntity)?;

        self.game_store
            .list_games(&query)
            .await?
            .into_iter()
            .map(|g| GameResponse::try_from(g).map_err(AccessError::from))
            .collect()
    }

    /// Games are immutable; always MethodNotSupported
    pub async fn update_game(&self, ctx: &RequestContext, game_id: i64) -> Result<GameResponse, AccessError> {
        self.precheck(ctx, &Action::UPDATE, ResourceKind::Game)?;
        self.authorize(ctx, &Action::UPDATE, &Resource::Game { game_id: Some(game_id) })?;
        Err(AccessError::MethodNotSupported)
    }

    /// Games cannot be removed; always MethodNotSupported
    pub async fn delete_game(&self, ctx: &RequestContext, game_id: i64) -> Result<GameResponse, AccessError> {
        self.precheck(ctx, &Action::Delete, ResourceKind::Game)?;
        self.authorize(ctx, &Action::Delete, &Resource::Game { game_id: Some(game_id) })?;
        Err(AccessError::MethodNotSupported)
    }
}
