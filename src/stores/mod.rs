// Stores layer - Data access; every method takes the connection or transaction to run on
pub mod role_store;
pub mod sppg_store;
pub mod system_settings_store;

pub use role_store::RoleStore;
pub use sppg_store::{NewSppg, SppgFilter, SppgStore, SppgWorkflowUpdate};
pub use system_settings_store::SystemSettingsStore;
