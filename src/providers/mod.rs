// Providers layer - units of work
//
// Providers hold the business rules (role resolution, settings cache,
// access decisions, status changes, CSV handling) and the HTTP clients for
// outside services. Coordinators compose them per endpoint.

pub mod access_guard;
pub mod region_provider;
pub mod role_resolver;
pub mod settings_provider;
pub mod sppg_csv;
pub mod sppg_id;
pub mod sppg_update_client;
pub mod status_workflow;
pub mod token_provider;

pub use access_guard::AccessGuard;
pub use region_provider::RegionProvider;
pub use role_resolver::RoleResolver;
pub use settings_provider::SystemSettingsProvider;
pub use sppg_update_client::SppgUpdateClient;
pub use status_workflow::{REFERENCE_MARKER, StatusWorkflow};
pub use token_provider::TokenProvider;
