use crate::errors::InternalError;
use crate::errors::internal::SppgError;
use crate::types::db::sppg::{self, ActiveModel, Entity as Sppg};
use crate::types::internal::SppgStatus;
use chrono::Utc;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Filters accepted by the record grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SppgFilter {
    pub status: Option<SppgStatus>,
    pub provinsi: Option<String>,
    /// Case-insensitive substring of `nama_sppg`; `%` and `_` match literally
    pub search: Option<String>,
}

/// Fully validated record ready to insert
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSppg {
    pub id_sppg: String,
    pub nama_sppg: String,
    pub provinsi: Option<String>,
    pub kabupaten: Option<String>,
    pub kecamatan: Option<String>,
    pub alamat: Option<String>,
    pub prog_stat: Option<SppgStatus>,
}

/// Workflow fields to change; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SppgWorkflowUpdate {
    pub prog_stat: Option<SppgStatus>,
    pub reff_attention: Option<String>,
}

/// `LIKE` pattern matching `search` literally anywhere in the column
fn contains_pattern(search: &str) -> LikeExpr {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}

/// SppgStore reads and writes SPPG records. Records are never deleted.
#[derive(Debug, Default)]
pub struct SppgStore {}

impl SppgStore {
    pub fn new() -> Self {
        Self {}
    }

    fn filter_condition(filter: &SppgFilter) -> Condition {
        let mut condition = Condition::all();

        if let Some(status) = filter.status {
            condition = match status {
                // Unset rows read as PENDING UPDATE
                SppgStatus::PendingUpdate => condition.add(
                    Condition::any()
                        .add(sppg::Column::ProgStat.is_null())
                        .add(sppg::Column::ProgStat.eq(""))
                        .add(sppg::Column::ProgStat.eq(status.as_str())),
                ),
                _ => condition.add(sppg::Column::ProgStat.eq(status.as_str())),
            };
        }

        if let Some(provinsi) = filter.provinsi.as_deref().filter(|p| !p.is_empty()) {
            condition = condition.add(sppg::Column::Provinsi.eq(provinsi));
        }

        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            condition = condition.add(sppg::Column::NamaSppg.like(contains_pattern(search)));
        }

        condition
    }

    /// One page of records ordered by name
    ///
    /// # Arguments
    /// * `page` - 1-based page number; pages past the end come back empty
    /// * `per_page` - Page size, must be at least 1
    ///
    /// # Returns
    /// * `Ok((records, total))` - The page and the total number of matching records
    pub async fn find_page(
        &self,
        conn: &impl ConnectionTrait,
        filter: &SppgFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<sppg::Model>, u64), InternalError> {
        let paginator = Sppg::find()
            .filter(Self::filter_condition(filter))
            .order_by_asc(sppg::Column::NamaSppg)
            .order_by_asc(sppg::Column::IdSppg)
            .paginate(conn, per_page.max(1));

        let total = paginator
            .num_items()
            .await
            .map_err(|e| InternalError::database("count_sppg", e))?;

        // Past the last page there is nothing to fetch; stopping here also
        // keeps the offset (page * per_page) from overflowing
        let last_page = total.div_ceil(per_page.max(1)).max(1);
        if page > last_page {
            return Ok((Vec::new(), total));
        }

        let records = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| InternalError::database("fetch_sppg_page", e))?;

        Ok((records, total))
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id_sppg: &str,
    ) -> Result<Option<sppg::Model>, InternalError> {
        Sppg::find_by_id(id_sppg.to_owned())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_sppg", e))
    }

    /// Fetch a record or fail with `RecordNotFound`
    pub async fn get(&self, conn: &impl ConnectionTrait, id_sppg: &str) -> Result<sppg::Model, InternalError> {
        self.find_by_id(conn, id_sppg)
            .await?
            .ok_or_else(|| SppgError::RecordNotFound(id_sppg.to_owned()).into())
    }

    /// Insert a record
    ///
    /// # Returns
    /// * `Ok(Model)` - The inserted row
    /// * `Err(InternalError::Sppg(DuplicateId))` - The id is taken
    pub async fn insert(&self, conn: &impl ConnectionTrait, record: NewSppg) -> Result<sppg::Model, InternalError> {
        if self.find_by_id(conn, &record.id_sppg).await?.is_some() {
            return Err(SppgError::DuplicateId(record.id_sppg).into());
        }

        let now = Utc::now().timestamp();
        let new_record = ActiveModel {
            id_sppg: Set(record.id_sppg),
            nama_sppg: Set(record.nama_sppg),
            provinsi: Set(record.provinsi),
            kabupaten: Set(record.kabupaten),
            kecamatan: Set(record.kecamatan),
            alamat: Set(record.alamat),
            prog_stat: Set(record.prog_stat.map(|status| status.as_str().to_string())),
            reff_attention: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_record
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("insert_sppg", e))
    }

    /// Apply a status and/or reference-marker change
    pub async fn update_workflow(
        &self,
        conn: &impl ConnectionTrait,
        id_sppg: &str,
        update: SppgWorkflowUpdate,
    ) -> Result<sppg::Model, InternalError> {
        let record = self.get(conn, id_sppg).await?;

        let mut active_model: ActiveModel = record.into();
        if let Some(status) = update.prog_stat {
            active_model.prog_stat = Set(Some(status.as_str().to_string()));
        }
        if let Some(marker) = update.reff_attention {
            active_model.reff_attention = Set(Some(marker));
        }
        active_model.updated_at = Set(Utc::now().timestamp());

        active_model
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_sppg_workflow", e))
    }

    /// Every record ordered by name, for export
    pub async fn list_all(&self, conn: &impl ConnectionTrait) -> Result<Vec<sppg::Model>, InternalError> {
        Sppg::find()
            .order_by_asc(sppg::Column::NamaSppg)
            .order_by_asc(sppg::Column::IdSppg)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_sppg", e))
    }

    /// Raw `(prog_stat, reff_attention)` pairs of every record
    pub async fn workflow_columns(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<(Option<String>, Option<String>)>, InternalError> {
        Sppg::find()
            .select_only()
            .column(sppg::Column::ProgStat)
            .column(sppg::Column::ReffAttention)
            .into_tuple::<(Option<String>, Option<String>)>()
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_sppg_workflow_columns", e))
    }
}
