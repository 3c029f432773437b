// Internal domain types - never exposed directly through the API
pub mod access;
pub mod auth;
pub mod context;
pub mod page;
pub mod role;
pub mod settings;
pub mod sppg_status;

pub use access::{AccessDecision, GuardRequirements, Load, SessionSnapshot};
pub use auth::{Claims, Identity};
pub use page::Page;
pub use role::{ResolvedRole, Role, RoleSource};
pub use settings::SettingsSnapshot;
pub use sppg_status::SppgStatus;
