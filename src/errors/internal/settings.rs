use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("System setting not found: {0}")]
    SettingNotFound(String),
}
