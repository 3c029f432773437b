use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{AppSettings, MockEnvironment, migrate_database};
use crate::types::internal::Identity;
use crate::types::internal::context::RequestContext;

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";

/// Fresh in-memory database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    migrate_database(&db).await.expect("Failed to run migrations");

    db
}

/// Settings pointing every outside service at a closed loopback port
pub fn test_app_settings() -> AppSettings {
    let env = MockEnvironment::empty().with_vars(&[
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("DATABASE_URL", "sqlite::memory:"),
        ("REGION_API_URL", "http://127.0.0.1:9"),
        ("SPPG_API_URL", "http://127.0.0.1:9/api"),
        ("HTTP_TIMEOUT_SECS", "1"),
    ]);

    AppSettings::from_env_provider(Arc::new(env)).expect("Failed to build test settings")
}

/// AppData over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::init(db, test_app_settings()))
}

/// Context for a signed-in caller
pub fn test_context(user_id: &str) -> RequestContext {
    RequestContext::for_system("test").with_identity(Identity::new(user_id))
}
