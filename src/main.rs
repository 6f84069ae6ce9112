use std::sync::Arc;

use boardplay_backend::AppData;
use boardplay_backend::api::{GameApi, HealthApi, PlayApi, UserApi};
use boardplay_backend::cli::{self, Cli, Commands};
use boardplay_backend::config::{ApplicationError, BootstrapSettings, init_logging};
use clap::Parser;
use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().map_err(ApplicationError::from)?;

    let cli = Cli::parse();
    let settings = BootstrapSettings::from_env()?;
    tracing::debug!("Bootstrap settings: {:?}", settings);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&settings).await?,
        Commands::Migrate => cli::migrate::run_migrations(&settings).await?,
        command => {
            let app_data = AppData::init(&settings).await?;
            cli::execute_command(command, &app_data).await?;
        }
    }

    Ok(())
}

async fn serve(settings: &BootstrapSettings) -> Result<(), ApplicationError> {
    let app_data = Arc::new(AppData::init(settings).await?);

    let apis = (
        HealthApi,
        UserApi::new(app_data.clone()),
        GameApi::new(app_data.clone()),
        PlayApi::new(app_data.clone()),
    );

    let public_url = format!("http://localhost:{}/api", settings.server_port());
    let api_service = OpenApiService::new(apis, "Boardplay API", env!("CARGO_PKG_VERSION")).server(public_url);
    let ui = api_service.swagger_ui();

    // API under /api, Swagger UI under /swagger
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    let address = settings.server_address();
    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", settings.server_port());

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
