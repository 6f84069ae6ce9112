use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{ApplicationError, BootstrapSettings, SecretManager, init_database, migrate_database};
use crate::providers::{AuthorizationProvider, CryptoProvider, TokenProvider, ValidationProvider};
use crate::stores::{CredentialStore, GameStore, PlayStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ↓ creates once
///   ├─ db (DatabaseConnection)
///   ├─ secret_manager, crypto_provider
///   ├─ credential_store, game_store, play_store
///   └─ token_provider, validation_provider, authorization_provider
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   └─ UserCoordinator / GameCoordinator / PlayCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub secret_manager: Arc<SecretManager>,
    pub crypto_provider: Arc<CryptoProvider>,
    pub credential_store: Arc<CredentialStore>,
    pub game_store: Arc<GameStore>,
    pub play_store: Arc<PlayStore>,
    pub token_provider: Arc<TokenProvider>,
    pub validation_provider: Arc<ValidationProvider>,
    pub authorization_provider: Arc<AuthorizationProvider>,
}

impl AppData {
    /// Wire stores and providers over an already migrated connection
    pub fn new(
        db: DatabaseConnection,
        secret_manager: Arc<SecretManager>,
        crypto_provider: Arc<CryptoProvider>,
        token_ttl_seconds: i64,
    ) -> Self {
        // Order matters: stores first, providers depend on them
        let credential_store = Arc::new(CredentialStore::new(db.clone(), crypto_provider.clone()));
        let game_store = Arc::new(GameStore::new(db.clone()));
        let play_store = Arc::new(PlayStore::new(db.clone()));

        let token_provider = Arc::new(TokenProvider::new(
            secret_manager.clone(),
            credential_store.clone(),
            token_ttl_seconds,
        ));
        let validation_provider = Arc::new(ValidationProvider::new(
            credential_store.clone(),
            game_store.clone(),
        ));
        let authorization_provider = Arc::new(AuthorizationProvider::new());

        Self {
            db,
            secret_manager,
            crypto_provider,
            credential_store,
            game_store,
            play_store,
            token_provider,
            validation_provider,
            authorization_provider,
        }
    }

    /// Initialize all application data
    ///
    /// Loads secrets, connects to the database and runs pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError` when secrets are missing or the database is unreachable
    pub async fn init(settings: &BootstrapSettings) -> Result<Self, ApplicationError> {
        tracing::info!("Initializing AppData...");

        let secret_manager = Arc::new(SecretManager::init()?);
        tracing::debug!("Secret manager initialized: {}", secret_manager);

        let db = init_database(settings).await?;
        migrate_database(&db).await?;

        let crypto_provider = Arc::new(CryptoProvider::new(secret_manager.pepper()));

        tracing::info!("AppData initialization complete");

        Ok(Self::new(db, secret_manager, crypto_provider, settings.token_ttl_seconds()))
    }
}
