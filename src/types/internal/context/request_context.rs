use std::net::IpAddr;

use crate::providers::TokenProvider;
use crate::types::internal::auth::Identity;
use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through API, coordinator and store layers
///
/// Carries who is calling (if anyone) and enough metadata to correlate
/// log lines for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request
    pub request_id: RequestId,

    /// Authenticated identity, if a valid bearer token was presented
    pub identity: Option<Identity>,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Actor recorded in `updated_by` columns and logs
    pub actor_id: String,
}

impl RequestContext {
    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            identity: None,
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create a RequestContext for system operations
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            identity: None,
            source: RequestSource::System,
            actor_id: format!("system:{}", operation_name),
        }
    }

    /// Build the context for an API request
    ///
    /// An absent, malformed or expired bearer token leaves the context
    /// unauthenticated; the caller decides what that means.
    pub fn from_request(req: &Request, token_provider: &TokenProvider) -> Self {
        let mut ctx = RequestContext {
            ip_address: Self::extract_ip_address(req),
            request_id: RequestId::new(),
            identity: None,
            source: RequestSource::API,
            actor_id: "anonymous".to_owned(),
        };

        if let Ok(bearer) = Bearer::from_request(req) {
            match token_provider.validate_jwt(&bearer.token) {
                Ok(claims) => {
                    ctx = ctx.with_identity(Identity::from(claims));
                }
                Err(e) => {
                    tracing::debug!("Bearer token rejected: {}", e);
                }
            }
        }

        tracing::trace!("Request context created: {:?}", ctx);

        ctx
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Attach an authenticated identity; the actor becomes its subject id
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.actor_id = identity.user_id.clone();
        self.identity = Some(identity);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
