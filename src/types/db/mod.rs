// Database entities - SeaORM models
pub mod sppg;
pub mod system_settings;
pub mod user_role;
