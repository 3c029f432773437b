use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::payload::{Json, PlainText};
use poem_openapi::{OpenApi, Tags};

use crate::api::BearerAuth;
use crate::api::helpers;
use crate::coordinators::sppg_coordinator::DEFAULT_PER_PAGE;
use crate::coordinators::{AccessCoordinator, SppgCoordinator};
use crate::errors::ApiError;
use crate::stores::SppgFilter;
use crate::types::dto::sppg::{
    CreateSppgRequest, ImportResponse, SppgDto, SppgListResponse, SppgSummaryResponse, SppgWriteResponse,
    UpdateSppgRequest,
};
use crate::types::internal::{GuardRequirements, Page, SppgStatus};

/// SPPG record management
///
/// Reads are open to every role while the SPPG page is enabled; writes
/// additionally require SUPER_USER.
pub struct SppgApi {
    access: Arc<AccessCoordinator>,
    sppg: Arc<SppgCoordinator>,
}

impl SppgApi {
    pub fn new(access: Arc<AccessCoordinator>, sppg: Arc<SppgCoordinator>) -> Self {
        Self { access, sppg }
    }

    fn read_requirements() -> GuardRequirements {
        Page::Sppg.requirements()
    }

    fn write_requirements() -> GuardRequirements {
        Page::Sppg.requirements().requiring_super_user()
    }
}

#[derive(Tags)]
enum SppgTags {
    /// SPPG records
    Sppg,
}

#[OpenApi]
impl SppgApi {
    /// One page of the record grid
    #[oai(path = "/sppg", method = "get", tag = "SppgTags::Sppg")]
    async fn list(
        &self,
        req: &Request,
        _auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
        status: Query<Option<String>>,
        provinsi: Query<Option<String>>,
        search: Query<Option<String>>,
    ) -> Result<Json<SppgListResponse>, ApiError> {
        let (_, authorized) = helpers::authorize(&self.access, req, &Self::read_requirements()).await?;

        let status = match status.0.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                SppgStatus::parse(raw).ok_or_else(|| ApiError::bad_request(format!("Unknown status: {}", raw)))?,
            ),
            None => None,
        };

        let filter = SppgFilter {
            status,
            provinsi: provinsi.0,
            search: search.0,
        };

        let response = self
            .sppg
            .list(
                filter,
                page.0.unwrap_or(1),
                per_page.0.unwrap_or(DEFAULT_PER_PAGE),
                authorized.role.is_super_user(),
            )
            .await?;

        Ok(Json(response))
    }

    /// Record counts per status for the KPI cards
    #[oai(path = "/sppg/summary", method = "get", tag = "SppgTags::Sppg")]
    async fn summary(&self, req: &Request, _auth: BearerAuth) -> Result<Json<SppgSummaryResponse>, ApiError> {
        helpers::authorize(&self.access, req, &Self::read_requirements()).await?;
        Ok(Json(self.sppg.summary().await?))
    }

    /// Every record as CSV
    #[oai(path = "/sppg/export", method = "get", tag = "SppgTags::Sppg")]
    async fn export(&self, req: &Request, _auth: BearerAuth) -> Result<PlainText<String>, ApiError> {
        helpers::authorize(&self.access, req, &Self::read_requirements()).await?;
        Ok(PlainText(self.sppg.export_csv().await?))
    }

    /// A single record
    #[oai(path = "/sppg/:id", method = "get", tag = "SppgTags::Sppg")]
    async fn get(&self, req: &Request, _auth: BearerAuth, id: Path<String>) -> Result<Json<SppgDto>, ApiError> {
        helpers::authorize(&self.access, req, &Self::read_requirements()).await?;
        Ok(Json(self.sppg.get(&id.0).await?))
    }

    /// Create a record; the id is generated when omitted
    #[oai(path = "/sppg", method = "post", tag = "SppgTags::Sppg")]
    async fn create(
        &self,
        req: &Request,
        _auth: BearerAuth,
        body: Json<CreateSppgRequest>,
    ) -> Result<Json<SppgWriteResponse>, ApiError> {
        let (ctx, _) = helpers::authorize(&self.access, req, &Self::write_requirements()).await?;
        let record = self.sppg.create(&ctx, body.0).await?;

        Ok(Json(SppgWriteResponse {
            success: true,
            message: "Data SPPG berhasil ditambahkan".to_string(),
            record: record.into(),
        }))
    }

    /// Record update endpoint: status and/or reference marker
    ///
    /// Answers with the stored row so the caller can refresh its view.
    #[oai(path = "/sppg", method = "put", tag = "SppgTags::Sppg")]
    async fn update(
        &self,
        req: &Request,
        _auth: BearerAuth,
        body: Json<UpdateSppgRequest>,
    ) -> Result<Json<SppgWriteResponse>, ApiError> {
        let (ctx, _) = helpers::authorize(&self.access, req, &Self::write_requirements()).await?;
        let record = self.sppg.update(&ctx, body.0).await?;

        Ok(Json(SppgWriteResponse {
            success: true,
            message: "Status SPPG berhasil diperbarui".to_string(),
            record: record.into(),
        }))
    }

    /// Bulk import from a CSV body
    #[oai(path = "/sppg/import", method = "post", tag = "SppgTags::Sppg")]
    async fn import(
        &self,
        req: &Request,
        _auth: BearerAuth,
        body: PlainText<String>,
    ) -> Result<Json<ImportResponse>, ApiError> {
        let (ctx, _) = helpers::authorize(&self.access, req, &Self::write_requirements()).await?;
        Ok(Json(self.sppg.import_csv(&ctx, &body.0).await?))
    }
}
