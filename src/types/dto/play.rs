use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;
use crate::stores::play_store::decode_additional_data;
use crate::types::db::play;

/// Request model for recording a play
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreatePlayRequest {
    /// Game that was played; must exist
    pub game_id: Option<i64>,

    #[oai(default)]
    pub name: String,

    /// Free-form JSON payload (scores, players, notes); must not be null
    pub additional_data: Option<serde_json::Value>,

    /// Unix timestamp of the session; required
    pub played_at: Option<i64>,
}

#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResponse {
    pub id: i64,
    pub user_id: i64,
    pub game_id: i64,
    pub name: String,
    pub additional_data: serde_json::Value,
    pub played_at: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<play::Model> for PlayResponse {
    type Error = InternalError;

    fn try_from(model: play::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            additional_data: decode_additional_data(&model)?,
            id: model.id,
            user_id: model.user_id,
            game_id: model.game_id,
            name: model.name,
            played_at: model.played_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[derive(ApiResponse)]
pub enum CreatePlayApiResponse {
    /// Play recorded
    #[oai(status = 201)]
    Created(Json<PlayResponse>),
}
