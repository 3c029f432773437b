use poem::Request;

use crate::coordinators::{AccessCoordinator, Authorized};
use crate::errors::ApiError;
use crate::types::internal::GuardRequirements;
use crate::types::internal::context::RequestContext;

/// Resolve the caller and run the access guard for one endpoint
///
/// # Returns
/// * `Ok((ctx, authorized))` - The request context and the granted caller
/// * `Err(ApiError)` - 401, 403 or 503 depending on the guard's decision
pub async fn authorize(
    access: &AccessCoordinator,
    req: &Request,
    requirements: &GuardRequirements,
) -> Result<(RequestContext, Authorized), ApiError> {
    let ctx = access.context(req);

    match access.authorize(&ctx, requirements).await {
        Ok(authorized) => Ok((ctx, authorized)),
        Err(decision) => Err(ApiError::from_decision(decision).unwrap_or_else(ApiError::unauthorized)),
    }
}
