use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppSettings;
use crate::providers::{
    RegionProvider, RoleResolver, SppgUpdateClient, StatusWorkflow, SystemSettingsProvider, TokenProvider,
};
use crate::stores::{RoleStore, SppgStore, SystemSettingsStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything is created once in main.rs and shared across coordinators and
/// CLI commands.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db, app_settings)
///   ↓ creates once
///   ├─ stores (role, system settings, sppg)
///   ├─ token_provider
///   ├─ role_resolver, settings_provider, status_workflow
///   └─ region_provider
///   ↓ wrapped in Arc<AppData>
///   ├─ AccessCoordinator::new(app_data)
///   ├─ SettingsCoordinator::new(app_data)
///   └─ SppgCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub app_settings: AppSettings,
    pub role_store: Arc<RoleStore>,
    pub system_settings_store: Arc<SystemSettingsStore>,
    pub sppg_store: Arc<SppgStore>,
    pub token_provider: Arc<TokenProvider>,
    pub role_resolver: Arc<RoleResolver>,
    pub settings_provider: Arc<SystemSettingsProvider>,
    pub status_workflow: Arc<StatusWorkflow>,
    pub region_provider: Arc<RegionProvider>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database must already be connected and migrated.
    pub fn init(db: DatabaseConnection, app_settings: AppSettings) -> Self {
        tracing::info!("Initializing AppData...");

        let role_store = Arc::new(RoleStore::new());
        let system_settings_store = Arc::new(SystemSettingsStore::new());
        let sppg_store = Arc::new(SppgStore::new());
        tracing::debug!("Stores created");

        let token_provider = Arc::new(TokenProvider::new(app_settings.jwt_secret()));
        let role_resolver = Arc::new(RoleResolver::new(db.clone(), role_store.clone()));
        let settings_provider = Arc::new(SystemSettingsProvider::new(
            db.clone(),
            system_settings_store.clone(),
        ));
        let status_workflow = Arc::new(StatusWorkflow::new(db.clone(), sppg_store.clone()));
        let region_provider = Arc::new(RegionProvider::new(
            app_settings.region_api_url(),
            app_settings.http_timeout(),
        ));
        tracing::debug!("Providers created");

        tracing::info!("AppData initialization complete");

        Self {
            db,
            app_settings,
            role_store,
            system_settings_store,
            sppg_store,
            token_provider,
            role_resolver,
            settings_provider,
            status_workflow,
            region_provider,
        }
    }

    /// Client for the record update endpoint configured by `SPPG_API_URL`
    pub fn sppg_update_client(&self) -> SppgUpdateClient {
        SppgUpdateClient::new(
            self.app_settings.sppg_api_url(),
            self.app_settings.sppg_api_token().map(str::to_owned),
            self.app_settings.http_timeout(),
        )
    }
}

impl std::fmt::Debug for AppData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppData")
            .field("db", &"<connection>")
            .field("app_settings", &self.app_settings)
            .finish_non_exhaustive()
    }
}
