use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sppg")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_sppg: String,
    pub nama_sppg: String,

    // Region hierarchy, stored by name
    pub provinsi: Option<String>,
    pub kabupaten: Option<String>,
    pub kecamatan: Option<String>,
    pub alamat: Option<String>,

    // Workflow status; NULL reads as PENDING UPDATE
    pub prog_stat: Option<String>,
    pub reff_attention: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
