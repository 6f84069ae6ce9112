use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// JSON array of designer names
    pub designers: String,
    pub cover: String,
    pub created_at: i64,
    pub updated_at: i64,
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
