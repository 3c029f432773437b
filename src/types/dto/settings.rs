use poem_openapi::Object;

use crate::types::db::system_settings;

/// One system setting row
#[derive(Object, Debug, Clone)]
pub struct SystemSettingDto {
    pub id: i32,
    pub key: String,
    pub value: bool,
    pub description: Option<String>,
    /// Unix timestamp of the last change
    pub updated_at: i64,
    pub updated_by: Option<String>,
}

impl From<system_settings::Model> for SystemSettingDto {
    fn from(model: system_settings::Model) -> Self {
        Self {
            id: model.id,
            key: model.key,
            value: model.value,
            description: model.description,
            updated_at: model.updated_at,
            updated_by: model.updated_by,
        }
    }
}

/// All settings, ordered by key
#[derive(Object, Debug)]
pub struct SettingsListResponse {
    pub settings: Vec<SystemSettingDto>,
}

/// Request to switch a setting on or off
#[derive(Object, Debug)]
pub struct UpdateSettingRequest {
    pub value: bool,
}

/// Response after a setting change
#[derive(Object, Debug)]
pub struct UpdateSettingResponse {
    pub success: bool,
    pub message: String,
    pub setting: SystemSettingDto,
}
