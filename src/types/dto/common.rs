use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Liveness probe answer
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,

    /// RFC 3339 time of the check
    pub timestamp: String,
}

/// JSON body of every error answer
///
/// The update client reads `message` back to show it to the operator.
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable category, e.g. `page_unavailable`
    pub error: String,

    /// Message for the notification, in Indonesian for gating errors
    pub message: String,

    pub status_code: u16,
}
