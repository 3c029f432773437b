use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::sppg;
use crate::types::internal::SppgStatus;

/// SPPG record as returned by the API
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SppgDto {
    pub id_sppg: String,
    pub nama_sppg: String,
    pub provinsi: Option<String>,
    pub kabupaten: Option<String>,
    pub kecamatan: Option<String>,
    pub alamat: Option<String>,
    /// Workflow status; never empty
    pub prog_stat: String,
    pub reff_attention: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<sppg::Model> for SppgDto {
    fn from(model: sppg::Model) -> Self {
        let prog_stat = SppgStatus::from_stored(model.prog_stat.as_deref());
        Self {
            id_sppg: model.id_sppg,
            nama_sppg: model.nama_sppg,
            provinsi: model.provinsi,
            kabupaten: model.kabupaten,
            kecamatan: model.kecamatan,
            alamat: model.alamat,
            prog_stat: prog_stat.as_str().to_string(),
            reff_attention: model.reff_attention,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// One page of SPPG records
#[derive(Object, Debug)]
pub struct SppgListResponse {
    pub items: Vec<SppgDto>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    /// Whether the caller may change status; read-only callers get inert text
    pub editable: bool,
    /// Statuses an editor may choose from
    pub status_options: Vec<String>,
}

/// Request to create a single SPPG record
#[derive(Object, Debug, Clone, Default)]
pub struct CreateSppgRequest {
    /// Eight letters; generated when omitted
    pub id_sppg: Option<String>,
    #[oai(validator(min_length = 1, max_length = 255))]
    pub nama_sppg: String,
    pub provinsi: Option<String>,
    pub kabupaten: Option<String>,
    pub kecamatan: Option<String>,
    pub alamat: Option<String>,
    pub prog_stat: Option<String>,
}

/// Body of the record update endpoint
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSppgRequest {
    pub id_sppg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prog_stat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reff_attention: Option<String>,
}

/// Response after a record write
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct SppgWriteResponse {
    pub success: bool,
    pub message: String,
    pub record: SppgDto,
}

/// Result of a CSV import
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    /// Rows written (valid rows only)
    pub imported: u64,
    /// Rows skipped because `nama_sppg` was empty
    pub skipped: u64,
}

/// Record count for one status
#[derive(Object, Debug, Clone, PartialEq)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// KPI numbers for the SPPG dashboard cards
#[derive(Object, Debug)]
pub struct SppgSummaryResponse {
    pub total: u64,
    pub by_status: Vec<StatusCount>,
    pub reference_marked: u64,
}
