use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sppg::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sppg::IdSppg)
                            .string_len(8)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sppg::NamaSppg).string().not_null())
                    .col(ColumnDef::new(Sppg::Provinsi).string().null())
                    .col(ColumnDef::new(Sppg::Kabupaten).string().null())
                    .col(ColumnDef::new(Sppg::Kecamatan).string().null())
                    .col(ColumnDef::new(Sppg::Alamat).string().null())
                    .col(ColumnDef::new(Sppg::ProgStat).string().null())
                    .col(ColumnDef::new(Sppg::ReffAttention).string().null())
                    .col(ColumnDef::new(Sppg::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Sppg::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sppg_prog_stat")
                    .table(Sppg::Table)
                    .col(Sppg::ProgStat)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sppg_provinsi")
                    .table(Sppg::Table)
                    .col(Sppg::Provinsi)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sppg::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sppg {
    Table,
    IdSppg,
    NamaSppg,
    Provinsi,
    Kabupaten,
    Kecamatan,
    Alamat,
    ProgStat,
    ReffAttention,
    CreatedAt,
    UpdatedAt,
}
