use crate::types::db::system_settings;

/// Point-in-time copy of the system settings table, ordered by key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsSnapshot {
    entries: Vec<system_settings::Model>,
}

impl SettingsSnapshot {
    pub fn new(entries: Vec<system_settings::Model>) -> Self {
        Self { entries }
    }

    /// Resolved value of a flag. Keys missing from the set read as enabled.
    pub fn get(&self, key: &str) -> bool {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value)
            .unwrap_or(true)
    }

    pub fn entries(&self) -> &[system_settings::Model] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
