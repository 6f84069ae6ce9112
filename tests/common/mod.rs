// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use argon2::Params;
use boardplay_backend::AppData;
use boardplay_backend::api::{GameApi, HealthApi, PlayApi, UserApi};
use boardplay_backend::config::SecretManager;
use boardplay_backend::providers::CryptoProvider;
use boardplay_backend::stores::{NewGame, NewUser};
use boardplay_backend::types::db::{game, user};
use boardplay_backend::types::internal::RequestContext;
use boardplay_backend::types::internal::auth::Role;
use migration::{Migrator, MigratorTrait};
use poem::Route;
use poem::test::TestClient;
use poem_openapi::OpenApiService;
use sea_orm::Database;

pub const TEST_JWT_SECRET: &str = "integration-secret-minimum-32-characters";
pub const TEST_PEPPER: &str = "integration-pepper";

/// Fully wired AppData over a fresh in-memory database
pub async fn setup_app() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let secret_manager = Arc::new(SecretManager::new(TEST_JWT_SECRET, TEST_PEPPER));
    let params = Params::new(8, 1, 1, None).expect("valid argon2 params");
    let crypto_provider = Arc::new(CryptoProvider::with_params(TEST_PEPPER, params));

    Arc::new(AppData::new(db, secret_manager, crypto_provider, 3600))
}

/// HTTP client over the same routes main serves
pub fn test_client(app: &Arc<AppData>) -> TestClient<Route> {
    let apis = (
        HealthApi,
        UserApi::new(app.clone()),
        GameApi::new(app.clone()),
        PlayApi::new(app.clone()),
    );
    let service = OpenApiService::new(apis, "Boardplay API", "test");
    TestClient::new(Route::new().nest("/api", service))
}

/// Insert a user straight into the store, bypassing policy
pub async fn seed_user(app: &AppData, name: &str, role: Role) -> user::Model {
    app.credential_store
        .add_user(NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name),
            password: "password".to_string(),
            role,
        })
        .await
        .expect("Failed to seed user")
}

pub async fn seed_game(app: &AppData, name: &str) -> game::Model {
    app.game_store
        .add_game(NewGame {
            name: name.to_string(),
            designers: vec!["Klaus Teuber".to_string()],
            cover: "aGVsbG8=".to_string(),
        })
        .await
        .expect("Failed to seed game")
}

/// Request context for an already stored user, resolved through a real token
pub async fn context_for(app: &AppData, user_id: i64) -> RequestContext {
    let token = bearer_for(app, user_id);
    RequestContext::from_bearer(Some(&token), &app.token_provider)
        .await
        .expect("Failed to build context")
}

/// A fresh token for `user_id`
pub fn bearer_for(app: &AppData, user_id: i64) -> String {
    app.token_provider
        .issue(user_id)
        .expect("Failed to issue token")
        .token
}
