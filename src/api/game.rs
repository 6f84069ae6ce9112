use std::sync::Arc;

use poem::Request;
use poem_openapi::{
    OpenApi, Tags,
    param::{Path, Query},
    payload::Json,
};

use crate::AppData;
use crate::api::Api;
use crate::coordinators::{GameCoordinator, GameListParams};
use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::dto::game::{CreateGameApiResponse, CreateGameRequest, GameResponse};

/// Shared game catalogue
pub struct GameApi {
    token_provider: Arc<TokenProvider>,
    game_coordinator: GameCoordinator,
}

impl GameApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.token_provider),
            game_coordinator: GameCoordinator::new(app_data),
        }
    }
}

impl Api for GameApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[derive(Tags)]
enum GameTags {
    Games,
}

#[OpenApi(tag = "GameTags::Games")]
impl GameApi {
    /// Add a game to the catalogue (power users only)
    #[oai(path = "/games", method = "post")]
    async fn create_game(
        &self,
        req: &Request,
        body: Json<CreateGameRequest>,
    ) -> Result<CreateGameApiResponse, ApiError> {
        let ctx = self.request_context(req).await?;
        let game = self.game_coordinator.create_game(&ctx, body.0).await?;
        Ok(CreateGameApiResponse::Created(Json(game)))
    }

    /// List games
    ///
    /// `order` is one of id, name or created_at; `order_type=desc` reverses it.
    #[oai(path = "/games", method = "get")]
    async fn list_games(
        &self,
        req: &Request,
        order: Query<Option<String>>,
        order_type: Query<Option<String>>,
        search: Query<Option<String>>,
    ) -> Result<Json<Vec<GameResponse>>, ApiError> {
        let ctx = self.request_context(req).await?;
        let params = GameListParams {
            order: order.0,
            order_type: order_type.0,
            search: search.0,
        };
        Ok(Json(self.game_coordinator.list_games(&ctx, params).await?))
    }

    #[oai(path = "/games/:id", method = "get")]
    async fn get_game(&self, req: &Request, id: Path<i64>) -> Result<Json<GameResponse>, ApiError> {
        let ctx = self.request_context(req).await?;
        Ok(Json(self.game_coordinator.get_game(&ctx, id.0).await?))
    }

    /// Games are read-only once created
    #[oai(path = "/games/:id", method = "put")]
    async fn update_game(&self, req: &Request, id: Path<i64>) -> Result<Json<GameResponse>, ApiError> {
        let ctx = self.request_context(req).await?;
        Ok(Json(self.game_coordinator.update_game(&ctx, id.0).await?))
    }

    /// Games are never removed
    #[oai(path = "/games/:id", method = "delete")]
    async fn delete_game(&self, req: &Request, id: Path<i64>) -> Result<Json<GameResponse>, ApiError> {
        let ctx = self.request_context(req).await?;
        Ok(Json(self.game_coordinator.delete_game(&ctx, id.0).await?))
    }
}
