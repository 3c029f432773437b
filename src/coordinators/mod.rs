// Coordinators layer - Workflow orchestration
//
// Coordinators compose provider operations for specific API endpoints and
// CLI commands. They decide the sequence of operations; the rules live in
// the providers.

pub mod access_coordinator;
pub mod settings_coordinator;
pub mod sppg_coordinator;

pub use access_coordinator::{AccessCoordinator, Authorized};
pub use settings_coordinator::SettingsCoordinator;
pub use sppg_coordinator::SppgCoordinator;
