use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::play::{self, ActiveModel, Entity as Play};
use crate::types::internal::listing::{PlayQuery, PlaySortField, SortDirection};

/// A play about to be recorded; fields are already validated
#[derive(Debug, Clone)]
pub struct NewPlay {
    pub user_id: i64,
    pub game_id: i64,
    pub name: String,
    pub additional_data: serde_json::Value,
    pub played_at: i64,
}

/// PlayStore manages the play log of every user
pub struct PlayStore {
    db: DatabaseConnection,
}

impl PlayStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn add_play(&self, new_play: NewPlay) -> Result<play::Model, InternalError> {
        let additional_data = serde_json::to_string(&new_play.additional_data)
            .map_err(|e| InternalError::parse("additional_data", e.to_string()))?;
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            user_id: Set(new_play.user_id),
            game_id: Set(new_play.game_id),
            name: Set(new_play.name),
            additional_data: Set(additional_data),
            played_at: Set(new_play.played_at),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let stored = model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("add_play", e))?;

        tracing::info!(play_id = stored.id, user_id = stored.user_id, "Play recorded");

        Ok(stored)
    }

    /// Get a play that belongs to `owner_id`
    ///
    /// A play owned by someone else is reported as absent.
    pub async fn get_play(
        &self,
        owner_id: i64,
        play_id: i64,
    ) -> Result<Option<play::Model>, InternalError> {
        Play::find_by_id(play_id)
            .filter(play::Column::UserId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_play", e))
    }

    /// List the plays of one user
    ///
    /// Sorted by the requested column, ties broken by id ascending so equal
    /// keys keep insertion order.
    pub async fn list_plays(
        &self,
        owner_id: i64,
        query: &PlayQuery,
    ) -> Result<Vec<play::Model>, InternalError> {
        let column = match query.order {
            PlaySortField::Id => play::Column::Id,
            PlaySortField::GameId => play::Column::GameId,
            PlaySortField::PlayedAt => play::Column::PlayedAt,
            PlaySortField::Name => play::Column::Name,
            PlaySortField::CreatedAt => play::Column::CreatedAt,
        };
        let order = match query.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        let mut select = Play::find().filter(play::Column::UserId.eq(owner_id));
        if let Some(game_id) = query.game_id {
            select = select.filter(play::Column::GameId.eq(game_id));
        }
        if let Some(from) = query.from_date {
            select = select.filter(play::Column::PlayedAt.gte(from));
        }
        if let Some(to) = query.to_date {
            select = select.filter(play::Column::PlayedAt.lte(to));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            // Name or anywhere in the stored additional_data JSON
            select = select.filter(
                Condition::any()
                    .add(play::Column::Name.contains(search))
                    .add(play::Column::AdditionalData.contains(search)),
            );
        }

        select
            .order_by(column, order)
            .order_by_asc(play::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_plays", e))
    }
}

/// Decode the stored additional_data column
pub fn decode_additional_data(model: &play::Model) -> Result<serde_json::Value, InternalError> {
    serde_json::from_str(&model.additional_data)
        .map_err(|e| InternalError::parse("additional_data", e.to_string()))
}
