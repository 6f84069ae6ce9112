use crate::config::{BootstrapSettings, init_database, migrate_database};

/// Run database migrations
///
/// Connects and runs all pending migrations without initializing the full
/// AppData structure, so no secrets are required.
///
/// # Returns
/// * `Ok(())` - Migrations completed successfully
/// * `Err(...)` - Migration failed
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = init_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
