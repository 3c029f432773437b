use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::api::BearerAuth;
use crate::api::helpers;
use crate::coordinators::{AccessCoordinator, SettingsCoordinator};
use crate::errors::ApiError;
use crate::types::dto::settings::{SettingsListResponse, UpdateSettingRequest, UpdateSettingResponse};
use crate::types::internal::{GuardRequirements, Page};

/// System settings (page switches)
pub struct SettingsApi {
    access: Arc<AccessCoordinator>,
    settings: Arc<SettingsCoordinator>,
}

impl SettingsApi {
    pub fn new(access: Arc<AccessCoordinator>, settings: Arc<SettingsCoordinator>) -> Self {
        Self { access, settings }
    }
}

#[derive(Tags)]
enum SettingsTags {
    /// System settings
    Settings,
}

#[OpenApi]
impl SettingsApi {
    /// All settings, ordered by key
    ///
    /// Open to every signed-in user since the dashboard gates its menu on them.
    #[oai(path = "/settings", method = "get", tag = "SettingsTags::Settings")]
    async fn list(&self, req: &Request, _auth: BearerAuth) -> Result<Json<SettingsListResponse>, ApiError> {
        helpers::authorize(&self.access, req, &GuardRequirements::authenticated()).await?;
        Ok(Json(self.settings.list().await))
    }

    /// Switch a setting on or off (super user only)
    #[oai(path = "/settings/:id", method = "put", tag = "SettingsTags::Settings")]
    async fn update(
        &self,
        req: &Request,
        _auth: BearerAuth,
        id: Path<i32>,
        body: Json<UpdateSettingRequest>,
    ) -> Result<Json<UpdateSettingResponse>, ApiError> {
        let (ctx, _) = helpers::authorize(&self.access, req, &Page::Settings.requirements()).await?;
        let response = self.settings.update(&ctx, id.0, body.0.value).await?;
        Ok(Json(response))
    }
}
