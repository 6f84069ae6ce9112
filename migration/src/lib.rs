pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_games;
mod m20250301_000003_create_plays;
mod m20250301_000004_add_user_role;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_games::Migration),
            Box::new(m20250301_000003_create_plays::Migration),
            Box::new(m20250301_000004_add_user_role::Migration),
        ]
    }
}
