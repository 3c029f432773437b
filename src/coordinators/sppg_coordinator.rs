use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::SppgError;
use crate::providers::StatusWorkflow;
use crate::providers::sppg_csv::{self, ImportRow};
use crate::providers::sppg_id::{generate_sppg_id, normalize_sppg_id};
use crate::stores::{NewSppg, SppgFilter, SppgStore};
use crate::types::db::sppg;
use crate::types::dto::sppg::{
    CreateSppgRequest, ImportResponse, SppgDto, SppgListResponse, SppgSummaryResponse, StatusCount,
    UpdateSppgRequest,
};
use crate::types::internal::SppgStatus;
use crate::types::internal::context::RequestContext;

/// Largest page the grid may request
pub const MAX_PER_PAGE: u64 = 100;
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Attempts at drawing an unused id before giving up
const ID_ATTEMPTS: usize = 16;

/// SPPG record workflows: grid, create, import/export and status changes
pub struct SppgCoordinator {
    db: DatabaseConnection,
    sppg_store: Arc<SppgStore>,
    status_workflow: Arc<StatusWorkflow>,
}

impl SppgCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            sppg_store: app_data.sppg_store.clone(),
            status_workflow: app_data.status_workflow.clone(),
        }
    }

    /// One page of the record grid
    ///
    /// `editable` is echoed back so read-only sessions render status as
    /// plain text.
    pub async fn list(
        &self,
        filter: SppgFilter,
        page: u64,
        per_page: u64,
        editable: bool,
    ) -> Result<SppgListResponse, InternalError> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);

        let (records, total) = self.sppg_store.find_page(&self.db, &filter, page, per_page).await?;

        Ok(SppgListResponse {
            items: records.into_iter().map(SppgDto::from).collect(),
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
            editable,
            status_options: if editable {
                SppgStatus::ALL.iter().map(|s| s.as_str().to_string()).collect()
            } else {
                Vec::new()
            },
        })
    }

    pub async fn get(&self, id_sppg: &str) -> Result<SppgDto, InternalError> {
        let id_sppg = normalize_sppg_id(id_sppg)?;
        Ok(self.sppg_store.get(&self.db, &id_sppg).await?.into())
    }

    /// Record counts for the dashboard cards
    pub async fn summary(&self) -> Result<SppgSummaryResponse, InternalError> {
        let columns = self.sppg_store.workflow_columns(&self.db).await?;

        let mut counts = [0u64; SppgStatus::ALL.len()];
        let mut reference_marked = 0;
        for (prog_stat, reff_attention) in &columns {
            let status = SppgStatus::from_stored(prog_stat.as_deref());
            if let Some(index) = SppgStatus::ALL.iter().position(|s| *s == status) {
                counts[index] += 1;
            }
            if reff_attention.as_deref().is_some_and(|r| !r.trim().is_empty()) {
                reference_marked += 1;
            }
        }

        Ok(SppgSummaryResponse {
            total: columns.len() as u64,
            by_status: SppgStatus::ALL
                .iter()
                .zip(counts)
                .map(|(status, count)| StatusCount {
                    status: status.as_str().to_string(),
                    count,
                })
                .collect(),
            reference_marked,
        })
    }

    /// Create a single record from the form
    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateSppgRequest,
    ) -> Result<sppg::Model, InternalError> {
        let nama_sppg = request.nama_sppg.trim().to_string();
        if nama_sppg.is_empty() {
            return Err(SppgError::MissingName.into());
        }

        let prog_stat = match request.prog_stat.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(SppgStatus::parse(raw).ok_or_else(|| SppgError::UnknownStatus(raw.to_owned()))?),
            None => None,
        };
        let supplied_id = match request.id_sppg.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(normalize_sppg_id(raw)?),
            None => None,
        };

        let txn = self.begin().await?;
        let id_sppg = match supplied_id {
            Some(id) => id,
            None => self.unused_id(&txn).await?,
        };

        let record = self
            .sppg_store
            .insert(
                &txn,
                NewSppg {
                    id_sppg,
                    nama_sppg,
                    provinsi: non_blank(request.provinsi),
                    kabupaten: non_blank(request.kabupaten),
                    kecamatan: non_blank(request.kecamatan),
                    alamat: non_blank(request.alamat),
                    prog_stat,
                },
            )
            .await?;

        Self::commit(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            source = %ctx.source,
            "SPPG {} ({}) created by {}",
            record.id_sppg,
            record.nama_sppg,
            ctx.actor_id
        );

        Ok(record)
    }

    /// Import a CSV file in one transaction
    ///
    /// Rows without a name are skipped and counted. Any other failure rolls
    /// back every row of the file.
    pub async fn import_csv(&self, ctx: &RequestContext, input: &str) -> Result<ImportResponse, InternalError> {
        let parsed = sppg_csv::parse_import(input)?;

        let txn = self.begin().await?;
        let mut imported = 0u64;
        for row in parsed.rows {
            self.import_row(&txn, row).await?;
            imported += 1;
        }
        Self::commit(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            source = %ctx.source,
            "CSV import by {}: {} imported, {} skipped",
            ctx.actor_id,
            imported,
            parsed.skipped
        );

        Ok(ImportResponse {
            success: true,
            message: format!("{} data SPPG berhasil diimpor", imported),
            imported,
            skipped: parsed.skipped,
        })
    }

    async fn import_row(&self, txn: &DatabaseTransaction, row: ImportRow) -> Result<sppg::Model, InternalError> {
        let id_sppg = match row.id_sppg.as_deref() {
            Some(raw) => normalize_sppg_id(raw).map_err(|e| {
                tracing::warn!("CSV line {}: {}", row.line, e);
                e
            })?,
            None => self.unused_id(txn).await?,
        };

        self.sppg_store
            .insert(
                txn,
                NewSppg {
                    id_sppg,
                    nama_sppg: row.nama_sppg,
                    provinsi: row.provinsi,
                    kabupaten: row.kabupaten,
                    kecamatan: row.kecamatan,
                    alamat: row.alamat,
                    prog_stat: row.prog_stat,
                },
            )
            .await
    }

    /// Every record as CSV
    pub async fn export_csv(&self) -> Result<String, InternalError> {
        let records = self.sppg_store.list_all(&self.db).await?;
        tracing::debug!("Exporting {} SPPG records", records.len());
        Ok(sppg_csv::write_export(&records)?)
    }

    /// Apply a record update request
    pub async fn update(
        &self,
        ctx: &RequestContext,
        request: UpdateSppgRequest,
    ) -> Result<sppg::Model, InternalError> {
        let id_sppg = normalize_sppg_id(&request.id_sppg)?;

        self.status_workflow
            .apply_raw(
                ctx,
                &id_sppg,
                request.prog_stat.as_deref(),
                request.reff_attention.as_deref(),
            )
            .await
    }

    async fn unused_id(&self, txn: &DatabaseTransaction) -> Result<String, InternalError> {
        for _ in 0..ID_ATTEMPTS {
            let candidate = generate_sppg_id();
            if self.sppg_store.find_by_id(txn, &candidate).await?.is_none() {
                return Ok(candidate);
            }
            tracing::debug!("Generated SPPG id {} already taken, drawing again", candidate);
        }

        Err(InternalError::parse("id_sppg", "could not generate an unused id"))
    }

    async fn begin(&self) -> Result<DatabaseTransaction, InternalError> {
        self.db
            .begin()
            .await
            .map_err(InternalError::transaction_begin)
    }

    async fn commit(txn: DatabaseTransaction) -> Result<(), InternalError> {
        txn.commit()
            .await
            .map_err(InternalError::transaction_commit)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
