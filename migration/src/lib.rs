pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_user_roles;
mod m20250301_000002_create_system_settings;
mod m20250301_000003_create_sppg;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_user_roles::Migration),
            Box::new(m20250301_000002_create_system_settings::Migration),
            Box::new(m20250301_000003_create_sppg::Migration),
        ]
    }
}
