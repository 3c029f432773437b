use std::sync::Arc;

use clap::Parser;
use poem::{Server, listener::TcpListener};

use sppg_monitor::api;
use sppg_monitor::app_data::AppData;
use sppg_monitor::cli::{self, Cli};
use sppg_monitor::config::{AppSettings, init_database, init_logging, migrate_database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_logging()?;

    let app_settings = AppSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", app_settings);

    let db = init_database(app_settings.database_url()).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(db, app_settings));

    match cli.command {
        Some(command) if !matches!(command, cli::Commands::Serve) => {
            cli::execute_command(command, app_data).await?;
        }
        _ => serve(app_data).await?,
    }

    Ok(())
}

async fn serve(app_data: Arc<AppData>) -> Result<(), std::io::Error> {
    let bind_address = app_data.app_settings.bind_address();
    let port = app_data.app_settings.server_port();
    let server_url = format!("http://localhost:{}/api", port);

    let app = api::routes(app_data, &server_url);

    tracing::info!("Starting server on http://{}", bind_address);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", port);
    tracing::info!("API endpoints available at {}", server_url);

    Server::new(TcpListener::bind(bind_address)).run(app).await
}
