use crate::app_data::AppData;
use crate::config::migrate_database;

/// Apply pending migrations
///
/// main already migrates on start-up; this makes the step explicit for
/// deployment scripts.
pub async fn run_migrations(app_data: &AppData) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");
    migrate_database(&app_data.db).await?;
    println!("Migrations applied to {}", app_data.app_settings.database_url());
    Ok(())
}
