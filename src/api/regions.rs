use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::api::BearerAuth;
use crate::api::helpers;
use crate::coordinators::AccessCoordinator;
use crate::errors::ApiError;
use crate::providers::RegionProvider;
use crate::types::dto::regions::Region;
use crate::types::internal::GuardRequirements;

/// Province, regency and district lookups for the cascading selects
///
/// An unreachable reference service yields an empty list, never an error.
pub struct RegionsApi {
    access: Arc<AccessCoordinator>,
    regions: Arc<RegionProvider>,
}

impl RegionsApi {
    pub fn new(access: Arc<AccessCoordinator>, regions: Arc<RegionProvider>) -> Self {
        Self { access, regions }
    }
}

#[derive(Tags)]
enum RegionTags {
    /// Region hierarchy
    Regions,
}

#[OpenApi(prefix_path = "/regions")]
impl RegionsApi {
    #[oai(path = "/provinces", method = "get", tag = "RegionTags::Regions")]
    async fn provinces(&self, req: &Request, _auth: BearerAuth) -> Result<Json<Vec<Region>>, ApiError> {
        helpers::authorize(&self.access, req, &GuardRequirements::authenticated()).await?;
        Ok(Json(self.regions.list_provinces().await))
    }

    #[oai(path = "/provinces/:id/regencies", method = "get", tag = "RegionTags::Regions")]
    async fn regencies(
        &self,
        req: &Request,
        _auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<Vec<Region>>, ApiError> {
        helpers::authorize(&self.access, req, &GuardRequirements::authenticated()).await?;
        Ok(Json(self.regions.list_regencies(&id.0).await))
    }

    #[oai(path = "/regencies/:id/districts", method = "get", tag = "RegionTags::Regions")]
    async fn districts(
        &self,
        req: &Request,
        _auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<Vec<Region>>, ApiError> {
        helpers::authorize(&self.access, req, &GuardRequirements::authenticated()).await?;
        Ok(Json(self.regions.list_districts(&id.0).await))
    }
}
