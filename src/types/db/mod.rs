// Database entities - SeaORM models
pub mod game;
pub mod play;
pub mod user;
