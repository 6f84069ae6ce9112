use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::game::{self, ActiveModel, Entity as Game};
use crate::types::internal::listing::{GameQuery, GameSortField, SortDirection};

/// A game about to be created; fields are already validated
#[derive(Debug, Clone)]
pub struct NewGame {
    pub name: String,
    pub designers: Vec<String>,
    pub cover: String,
}

/// GameStore manages the game catalogue
pub struct GameStore {
    db: DatabaseConnection,
}

impl GameStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn add_game(&self, new_game: NewGame) -> Result<game::Model, InternalError> {
        let designers = serde_json::to_string(&new_game.designers)
            .map_err(|e| InternalError::parse("designers", e.to_string()))?;
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(new_game.name),
            designers: Set(designers),
            cover: Set(new_game.cover),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let stored = model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("add_game", e))?;

        tracing::info!(game_id = stored.id, "Game created");

        Ok(stored)
    }

    pub async fn get_game(&self, game_id: i64) -> Result<Option<game::Model>, InternalError> {
        Game::find_by_id(game_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_game", e))
    }

    pub async fn game_exists(&self, game_id: i64) -> Result<bool, InternalError> {
        let count = Game::find_by_id(game_id)
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("game_exists", e))?;
        Ok(count > 0)
    }

    /// List games sorted by the requested column, ties broken by id ascending
    ///
    /// `search` matches the name or any designer.
    pub async fn list_games(&self, query: &GameQuery) -> Result<Vec<game::Model>, InternalError> {
        let column = match query.order {
            GameSortField::Id => game::Column::Id,
            GameSortField::Name => game::Column::Name,
            GameSortField::CreatedAt => game::Column::CreatedAt,
        };
        let order = match query.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        let mut select = Game::find();
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(game::Column::Name.contains(search))
                    .add(game::Column::Designers.contains(search)),
            );
        }

        select
            .order_by(column, order)
            .order_by_asc(game::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_games", e))
    }
}

/// Decode the stored designers column
pub fn decode_designers(model: &game::Model) -> Result<Vec<String>, InternalError> {
    serde_json::from_str(&model.designers).map_err(|e| InternalError::parse("designers", e.to_string()))
}
