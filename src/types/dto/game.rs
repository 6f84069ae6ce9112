use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;
use crate::stores::game_store::decode_designers;
use crate::types::db::game;

/// Request model for adding a game to the catalogue
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateGameRequest {
    #[oai(default)]
    pub name: String,

    /// Ordered list of designer names
    #[oai(default)]
    pub designers: Vec<String>,

    /// Cover image, typically base64-encoded
    #[oai(default)]
    pub cover: String,
}

#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResponse {
    pub id: i64,
    pub name: String,
    pub designers: Vec<String>,
    pub cover: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<game::Model> for GameResponse {
    type Error = InternalError;

    fn try_from(model: game::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            designers: decode_designers(&model)?,
            id: model.id,
            name: model.name,
            cover: model.cover,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[derive(ApiResponse)]
pub enum CreateGameApiResponse {
    /// Game added
    #[oai(status = 201)]
    Created(Json<GameResponse>),
}
