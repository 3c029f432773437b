use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::api::BearerAuth;
use crate::api::helpers;
use crate::coordinators::AccessCoordinator;
use crate::errors::ApiError;
use crate::types::dto::access::{AccessResponse, MeResponse};
use crate::types::internal::{GuardRequirements, Page};

/// Identity and page-gating endpoints used by the dashboard shell
pub struct AccessApi {
    access: Arc<AccessCoordinator>,
}

impl AccessApi {
    pub fn new(access: Arc<AccessCoordinator>) -> Self {
        Self { access }
    }
}

#[derive(Tags)]
enum AccessTags {
    /// Session and page access
    Access,
}

#[OpenApi]
impl AccessApi {
    /// Identity and role flags of the caller
    #[oai(path = "/me", method = "get", tag = "AccessTags::Access")]
    async fn me(&self, req: &Request, _auth: BearerAuth) -> Result<Json<MeResponse>, ApiError> {
        let (_, authorized) = helpers::authorize(&self.access, req, &GuardRequirements::authenticated()).await?;
        Ok(Json(self.access.me(&authorized)))
    }

    /// Guard decision for a dashboard page
    ///
    /// Always answers 200 for a known page; the decision field tells the
    /// front-end whether to render the page, a notice, or the login view.
    #[oai(path = "/access/:page", method = "get", tag = "AccessTags::Access")]
    async fn page_access(&self, req: &Request, page: Path<String>) -> Result<Json<AccessResponse>, ApiError> {
        let page = Page::from_slug(&page.0)
            .ok_or_else(|| ApiError::not_found(format!("Halaman tidak dikenal: {}", page.0)))?;

        let ctx = self.access.context(req);
        Ok(Json(self.access.page_access(&ctx, page).await))
    }
}
