use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Page flags seeded on first run, all enabled
const SEED_SETTINGS: &[(&str, &str)] = &[
    ("digitalisasi_page_enabled", "Tampilkan halaman Digitalisasi"),
    ("kartu_sejahtera_page_enabled", "Tampilkan halaman Kartu Sejahtera"),
    ("koperasi_page_enabled", "Tampilkan halaman Koperasi"),
    ("mbg_page_enabled", "Tampilkan halaman Makan Bergizi Gratis"),
    ("sampah_page_enabled", "Tampilkan halaman Pengelolaan Sampah"),
    ("sekolah_page_enabled", "Tampilkan halaman Sekolah Rakyat"),
    ("sppg_page_enabled", "Tampilkan halaman manajemen SPPG"),
    ("umkm_page_enabled", "Tampilkan halaman UMKM"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SystemSettings::Key)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SystemSettings::Value).boolean().not_null())
                    .col(ColumnDef::new(SystemSettings::Description).string().null())
                    .col(ColumnDef::new(SystemSettings::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(SystemSettings::UpdatedBy).string().null())
                    .col(
                        ColumnDef::new(SystemSettings::Revision)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        for (key, description) in SEED_SETTINGS {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(SystemSettings::Table)
                        .columns([
                            SystemSettings::Key,
                            SystemSettings::Value,
                            SystemSettings::Description,
                            SystemSettings::UpdatedAt,
                        ])
                        .values_panic([
                            (*key).into(),
                            true.into(),
                            (*description).into(),
                            0i64.into(),
                        ])
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SystemSettings {
    Table,
    Id,
    Key,
    Value,
    Description,
    UpdatedAt,
    UpdatedBy,
    Revision,
}
