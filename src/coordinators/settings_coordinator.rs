use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::SystemSettingsProvider;
use crate::types::dto::settings::{SettingsListResponse, SystemSettingDto, UpdateSettingResponse};
use crate::types::internal::context::RequestContext;

/// Settings page workflows
pub struct SettingsCoordinator {
    settings_provider: Arc<SystemSettingsProvider>,
}

impl SettingsCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            settings_provider: app_data.settings_provider.clone(),
        }
    }

    /// Current settings from the cache, ordered by key
    pub async fn list(&self) -> SettingsListResponse {
        let snapshot = self.settings_provider.snapshot().await;

        SettingsListResponse {
            settings: snapshot
                .entries()
                .iter()
                .cloned()
                .map(SystemSettingDto::from)
                .collect(),
        }
    }

    /// Switch a setting and report the outcome for the notification
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i32,
        value: bool,
    ) -> Result<UpdateSettingResponse, InternalError> {
        let updated = self.settings_provider.update_setting(ctx, id, value).await?;

        let message = format!(
            "Pengaturan '{}' berhasil {}",
            updated.key,
            if updated.value { "diaktifkan" } else { "dinonaktifkan" }
        );

        Ok(UpdateSettingResponse {
            success: true,
            message,
            setting: updated.into(),
        })
    }
}
