// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use poem::Route;
use poem::test::{TestClient, TestResponse};
use sea_orm::{Database, DatabaseConnection};
use migration::{Migrator, MigratorTrait};
use sppg_monitor::api;
use sppg_monitor::app_data::AppData;
use sppg_monitor::config::{AppSettings, EnvironmentProvider};
use sppg_monitor::types::internal::Role;

pub const TEST_JWT_SECRET: &str = "integration-secret-key-minimum-32-characters";

/// Closed loopback port; anything pointed here fails fast
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

/// Environment backed by a fixed map
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn new(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Settings with every outside service pointed at `sppg_api_url` or nowhere
pub fn test_settings(sppg_api_url: &str) -> AppSettings {
    let env = TestEnvironment::new(&[
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("REGION_API_URL", UNREACHABLE_URL),
        ("SPPG_API_URL", sppg_api_url),
        ("HTTP_TIMEOUT_SECS", "2"),
    ]);

    AppSettings::from_env_provider(Arc::new(env)).expect("Failed to build test settings")
}

/// AppData over a fresh database
pub async fn setup_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::init(db, test_settings(UNREACHABLE_URL)))
}

/// HTTP routes over the given AppData
pub fn test_routes(app_data: Arc<AppData>) -> Route {
    api::routes(app_data, "http://localhost/api")
}

pub fn test_client(app_data: Arc<AppData>) -> TestClient<Route> {
    TestClient::new(test_routes(app_data))
}

/// Signed bearer header value for a subject
pub fn bearer(app_data: &AppData, user_id: &str) -> String {
    let token = app_data
        .token_provider
        .generate_jwt(user_id, Some(format!("{}@example.go.id", user_id)), 15)
        .expect("Failed to sign token");
    format!("Bearer {}", token)
}

pub async fn assign_role(app_data: &AppData, user_id: &str, role: Role) {
    app_data
        .role_store
        .assign_role(&app_data.db, user_id, role)
        .await
        .expect("Failed to assign role");
}

/// Switch a page flag directly through the settings provider
pub async fn set_flag(app_data: &AppData, key: &str, value: bool) {
    let ctx = sppg_monitor::types::internal::context::RequestContext::for_system("test");
    app_data
        .settings_provider
        .update_setting_by_key(&ctx, key, value)
        .await
        .expect("Failed to set flag");
}

pub async fn body_json(response: TestResponse) -> serde_json::Value {
    response
        .0
        .into_body()
        .into_json()
        .await
        .expect("Response body is not JSON")
}
