// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use argon2::Params;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::SecretManager;
use crate::providers::CryptoProvider;
use crate::stores::{CredentialStore, GameStore, NewGame, NewUser, PlayStore};
use crate::types::internal::auth::Role;

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";
pub const TEST_TOKEN_TTL_SECONDS: i64 = 3600;

/// Fresh in-memory database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Argon2 with minimal cost so hashing does not dominate test time
pub fn test_crypto_provider() -> Arc<CryptoProvider> {
    let params = Params::new(8, 1, 1, None).expect("valid argon2 params");
    Arc::new(CryptoProvider::with_params(TEST_PEPPER.to_string(), params))
}

/// Creates a test database and the three stores over it
///
/// Callers can discard what they don't need:
/// ```rust
/// let (_db, credential_store, _games, _plays) = setup_test_stores().await;
/// ```
pub async fn setup_test_stores() -> (
    DatabaseConnection,
    Arc<CredentialStore>,
    Arc<GameStore>,
    Arc<PlayStore>,
) {
    let db = setup_test_db().await;

    let credential_store = Arc::new(CredentialStore::new(db.clone(), test_crypto_provider()));
    let game_store = Arc::new(GameStore::new(db.clone()));
    let play_store = Arc::new(PlayStore::new(db.clone()));

    (db, credential_store, game_store, play_store)
}

/// Fully wired AppData over an in-memory database
pub async fn setup_test_app() -> Arc<AppData> {
    let db = setup_test_db().await;
    let secret_manager = Arc::new(SecretManager::new(TEST_JWT_SECRET, TEST_PEPPER));

    Arc::new(AppData::new(
        db,
        secret_manager,
        test_crypto_provider(),
        TEST_TOKEN_TTL_SECONDS,
    ))
}

/// A valid normal account named `name` with email `{name}@example.com`
pub fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name),
        password: "password".to_string(),
        role: Role::Normal,
    }
}

/// A valid game named `name`
pub fn new_game(name: &str) -> NewGame {
    NewGame {
        name: name.to_string(),
        designers: vec!["Uwe Rosenberg".to_string()],
        cover: format!("https://covers.example.com/{}.png", name.to_lowercase().replace(' ', "-")),
    }
}
