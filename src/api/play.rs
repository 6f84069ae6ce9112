use std::sync::Arc;

use poem::Request;
use poem_openapi::{
    OpenApi, Tags,
    param::{Path, Query},
    payload::Json,
};

use crate::AppData;
use crate::api::Api;
use crate::coordinators::{PlayCoordinator, PlayListParams};
use crate::errors::ApiError;
use crate::providers::TokenProvider;
use crate::types::dto::play::{CreatePlayApiResponse, CreatePlayRequest, PlayResponse};

/// Per-user play log, nested under the owning account
pub struct PlayApi {
    token_provider: Arc<TokenProvider>,
    play_coordinator: PlayCoordinator,
}

impl PlayApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.token_provider),
            play_coordinator: PlayCoordinator::new(app_data),
        }
    }
}

impl Api for PlayApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[derive(Tags)]
enum PlayTags {
    Plays,
}

#[OpenApi(tag = "PlayTags::Plays")]
impl PlayApi {
    /// Record a play for the account; owner or power user only
    #[oai(path = "/users/:id/plays", method = "post")]
    async fn create_play(
        &self,
        req: &Request,
        id: Path<i64>,
        body: Json<CreatePlayRequest>,
    ) -> Result<CreatePlayApiResponse, ApiError> {
        let ctx = self.request_context(req).await?;
        let play = self.play_coordinator.create_play(&ctx, id.0, body.0).await?;
        Ok(CreatePlayApiResponse::Created(Json(play)))
    }

    /// List the account's plays
    ///
    /// Dates are unix seconds and bound `played_at` inclusively.
    #[oai(path = "/users/:id/plays", method = "get")]
    #[allow(clippy::too_many_arguments)]
    async fn list_plays(
        &self,
        req: &Request,
        id: Path<i64>,
        order: Query<Option<String>>,
        order_type: Query<Option<String>>,
        game: Query<Option<i64>>,
        from_date: Query<Option<i64>>,
        to_date: Query<Option<i64>>,
        search: Query<Option<String>>,
    ) -> Result<Json<Vec<PlayResponse>>, ApiError> {
        let ctx = self.request_context(req).await?;
        let params = PlayListParams {
            order: order.0,
            order_type: order_type.0,
            game: game.0,
            from_date: from_date.0,
            to_date: to_date.0,
            search: search.0,
        };
        Ok(Json(self.play_coordinator.list_plays(&ctx, id.0, params).await?))
    }

    #[oai(path = "/users/:id/plays/:play_id", method = "get")]
    async fn get_play(
        &self,
        req: &Request,
        id: Path<i64>,
        play_id: Path<i64>,
    ) -> Result<Json<PlayResponse>, ApiError> {
        let ctx = self.request_context(req).await?;
        Ok(Json(self.play_coordinator.get_play(&ctx, id.0, play_id.0).await?))
    }

    /// Plays are immutable
    #[oai(path = "/users/:id/plays/:play_id", method = "put")]
    async fn update_play(
        &self,
        req: &Request,
        id: Path<i64>,
        play_id: Path<i64>,
    ) -> Result<Json<PlayResponse>, ApiError> {
        let ctx = self.request_context(req).await?;
        Ok(Json(self.play_coordinator.update_play(&ctx, id.0, play_id.0).await?))
    }

    #[oai(path = "/users/:id/plays/:play_id", method = "delete")]
    async fn delete_play(
        &self,
        req: &Request,
        id: Path<i64>,
        play_id: Path<i64>,
    ) -> Result<Json<PlayResponse>, ApiError> {
        let ctx = self.request_context(req).await?;
        Ok(Json(self.play_coordinator.delete_play(&ctx, id.0, play_id.0).await?))
    }
}
