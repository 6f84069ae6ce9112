// Request and response models exposed through the OpenAPI surface
pub mod auth;
pub mod common;
pub mod game;
pub mod play;
pub mod user;
