use thiserror::Error;

/// Errors raised while loading configuration at start-up
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required setting '{setting_name}' is missing")]
    MissingRequiredSetting { setting_name: String },

    #[error("Setting '{setting_name}' has invalid format. Expected: {expected}, got: {actual}")]
    InvalidFormat {
        setting_name: String,
        expected: String,
        actual: String,
    },
}

impl ConfigError {
    pub fn missing(setting_name: &str) -> Self {
        Self::MissingRequiredSetting {
            setting_name: setting_name.to_string(),
        }
    }

    pub fn invalid(setting_name: &str, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidFormat {
            setting_name: setting_name.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
