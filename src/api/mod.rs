// API layer - HTTP endpoints
pub mod access;
pub mod health;
pub mod helpers;
pub mod regions;
pub mod settings;
pub mod sppg;

use std::sync::Arc;

use poem::Route;
use poem_openapi::auth::Bearer;
use poem_openapi::{OpenApiService, SecurityScheme};

pub use access::AccessApi;
pub use health::HealthApi;
pub use regions::RegionsApi;
pub use settings::SettingsApi;
pub use sppg::SppgApi;

use crate::app_data::AppData;
use crate::coordinators::{AccessCoordinator, SettingsCoordinator, SppgCoordinator};

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(ty = "bearer", key_name = "Authorization", key_in = "header", bearer_format = "JWT")]
pub struct BearerAuth(Bearer);

pub type ApiSet = (HealthApi, AccessApi, SettingsApi, SppgApi, RegionsApi);

/// Build the OpenAPI service with every endpoint group
pub fn api_service(app_data: Arc<AppData>, server_url: &str) -> OpenApiService<ApiSet, ()> {
    let access = Arc::new(AccessCoordinator::new(app_data.clone()));
    let settings = Arc::new(SettingsCoordinator::new(app_data.clone()));
    let sppg = Arc::new(SppgCoordinator::new(app_data.clone()));

    let apis = (
        HealthApi,
        AccessApi::new(access.clone()),
        SettingsApi::new(access.clone(), settings),
        SppgApi::new(access.clone(), sppg),
        RegionsApi::new(access, app_data.region_provider.clone()),
    );

    OpenApiService::new(apis, "SPPG Monitoring API", env!("CARGO_PKG_VERSION")).server(server_url)
}

/// Compose the HTTP routes: API under `/api`, Swagger UI under `/swagger`
pub fn routes(app_data: Arc<AppData>, server_url: &str) -> Route {
    let api_service = api_service(app_data, server_url);
    let ui = api_service.swagger_ui();

    Route::new().nest("/api", api_service).nest("/swagger", ui)
}
