use std::sync::Arc;

use poem::Request;

use crate::app_data::AppData;
use crate::errors::api::{ACCESS_DENIED_TITLE, PAGE_UNAVAILABLE_TITLE};
use crate::providers::{AccessGuard, RoleResolver, SystemSettingsProvider, TokenProvider};
use crate::types::dto::access::{AccessNotice, AccessResponse, MeResponse};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{
    AccessDecision, GuardRequirements, Identity, Page, ResolvedRole, RoleSource, SessionSnapshot,
};

const BACK_LABEL: &str = "Kembali";

/// Caller that passed the guard
#[derive(Debug, Clone)]
pub struct Authorized {
    pub identity: Identity,
    pub role: ResolvedRole,
}

/// Resolves the session of each request and runs it through the access guard
pub struct AccessCoordinator {
    token_provider: Arc<TokenProvider>,
    role_resolver: Arc<RoleResolver>,
    settings_provider: Arc<SystemSettingsProvider>,
}

impl AccessCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: app_data.token_provider.clone(),
            role_resolver: app_data.role_resolver.clone(),
            settings_provider: app_data.settings_provider.clone(),
        }
    }

    /// Build the request context from the bearer token and client address
    pub fn context(&self, req: &Request) -> RequestContext {
        RequestContext::from_request(req, &self.token_provider)
    }

    /// Fully resolved session for a request
    ///
    /// The role is awaited before the snapshot is built, so the guard never
    /// sees a privileged session with an unknown role.
    pub async fn session_for(&self, ctx: &RequestContext) -> SessionSnapshot {
        let settings = self.settings_provider.snapshot().await;

        match &ctx.identity {
            Some(identity) => {
                let role = self.role_resolver.resolve(&identity.user_id).await;
                SessionSnapshot::resolved(identity.clone(), role, settings)
            }
            None => SessionSnapshot::anonymous(settings),
        }
    }

    /// Run the guard for an operation
    ///
    /// # Returns
    /// * `Ok(Authorized)` - Access granted
    /// * `Err(AccessDecision)` - The denial to report
    pub async fn authorize(
        &self,
        ctx: &RequestContext,
        requirements: &GuardRequirements,
    ) -> Result<Authorized, AccessDecision> {
        let session = self.session_for(ctx).await;
        let decision = AccessGuard::evaluate(&session, requirements);

        match (decision, session.identity(), session.role.ready()) {
            (AccessDecision::Granted, Some(identity), Some(role)) => Ok(Authorized {
                identity: identity.clone(),
                role: *role,
            }),
            (AccessDecision::Granted, _, _) => Err(AccessDecision::Loading),
            (denied, _, _) => {
                tracing::debug!(
                    request_id = %ctx.request_id,
                    "Access {} for {}",
                    denied.as_str(),
                    ctx.actor_id
                );
                Err(denied)
            }
        }
    }

    /// Guard decision for a dashboard page, with the notice to render
    pub async fn page_access(&self, ctx: &RequestContext, page: Page) -> AccessResponse {
        let session = self.session_for(ctx).await;
        let decision = AccessGuard::evaluate(&session, &page.requirements());

        let notice = match decision {
            AccessDecision::PageUnavailable => Some(AccessNotice {
                title: PAGE_UNAVAILABLE_TITLE.to_string(),
                message: "Halaman ini sedang dinonaktifkan oleh administrator.".to_string(),
                back_label: BACK_LABEL.to_string(),
            }),
            AccessDecision::AccessDenied => Some(AccessNotice {
                title: ACCESS_DENIED_TITLE.to_string(),
                message: "Anda tidak memiliki izin untuk mengakses halaman ini.".to_string(),
                back_label: BACK_LABEL.to_string(),
            }),
            _ => None,
        };

        AccessResponse {
            page: page.slug().to_string(),
            decision: decision.as_str().to_string(),
            is_super_user: session.is_super_user(),
            is_read_only: session.is_read_only(),
            notice,
        }
    }

    /// Identity and role flags of an authorized caller
    pub fn me(&self, authorized: &Authorized) -> MeResponse {
        MeResponse {
            user_id: authorized.identity.user_id.clone(),
            email: authorized.identity.email.clone(),
            role: authorized.role.role().as_str().to_string(),
            role_assigned: authorized.role.source() == RoleSource::Assigned,
            is_super_user: authorized.role.is_super_user(),
            is_read_only: authorized.role.is_read_only(),
        }
    }
}
