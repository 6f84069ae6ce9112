use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    /// Stored normalized (trimmed, lower-cased)
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,

    // "normal" or "power"
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::play::Entity")]
    Play,
}

impl Related<super::play::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Play.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
