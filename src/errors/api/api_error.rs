use crate::errors::internal::{ImportError, InternalError, SettingsError, SppgError};
use crate::types::dto::common::ErrorResponse;
use crate::types::internal::AccessDecision;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Title of the notice rendered when a page's setting is off
pub const PAGE_UNAVAILABLE_TITLE: &str = "Halaman Tidak Tersedia";

/// Title of the notice rendered when the role is insufficient
pub const ACCESS_DENIED_TITLE: &str = "Akses Ditolak";

/// API error types shared by all endpoint groups
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Request body or parameters are invalid
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// No authenticated identity; the client should show the login view
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Role is not sufficient for this operation
    #[oai(status = 403)]
    AccessDenied(Json<ErrorResponse>),

    /// Resource not found
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Resource already exists
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// An upstream service failed
    #[oai(status = 502)]
    UpstreamFailed(Json<ErrorResponse>),

    /// The page was switched off by an administrator
    #[oai(status = 503)]
    PageUnavailable(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(body("bad_request", message, 400))
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(body("unauthorized", "Silakan login terlebih dahulu", 401))
    }

    pub fn access_denied() -> Self {
        ApiError::AccessDenied(body(
            "access_denied",
            format!("{}: peran Anda tidak memiliki izin untuk tindakan ini", ACCESS_DENIED_TITLE),
            403,
        ))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(body("not_found", message, 404))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(body("conflict", message, 409))
    }

    pub fn upstream_failed(message: impl Into<String>) -> Self {
        ApiError::UpstreamFailed(body("upstream_failed", message, 502))
    }

    pub fn page_unavailable() -> Self {
        ApiError::PageUnavailable(body(
            "page_unavailable",
            format!("{}: halaman ini dinonaktifkan oleh administrator", PAGE_UNAVAILABLE_TITLE),
            503,
        ))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ApiError::InternalError(body("internal_error", message, 500))
    }

    /// Map a guard denial to its error
    ///
    /// Returns None for `Granted`. `Loading` never reaches the API because
    /// request sessions are resolved before evaluation.
    pub fn from_decision(decision: AccessDecision) -> Option<Self> {
        match decision {
            AccessDecision::Granted => None,
            AccessDecision::RedirectToLogin => Some(Self::unauthorized()),
            AccessDecision::PageUnavailable => Some(Self::page_unavailable()),
            AccessDecision::AccessDenied => Some(Self::access_denied()),
            AccessDecision::Loading => Some(Self::internal_error("Session is not resolved")),
        }
    }

    /// Convert an internal error, hiding infrastructure details
    pub fn from_internal_error(err: InternalError) -> Self {
        match err {
            InternalError::Sppg(SppgError::RecordNotFound(id)) => {
                Self::not_found(format!("SPPG tidak ditemukan: {}", id))
            }
            InternalError::Sppg(SppgError::DuplicateId(id)) => {
                Self::conflict(format!("ID SPPG sudah digunakan: {}", id))
            }
            InternalError::Sppg(e @ (SppgError::InvalidId(_)
            | SppgError::UnknownStatus(_)
            | SppgError::MissingName
            | SppgError::EmptyUpdate)) => Self::bad_request(e.to_string()),
            InternalError::Settings(SettingsError::SettingNotFound(id)) => {
                Self::not_found(format!("Pengaturan tidak ditemukan: {}", id))
            }
            InternalError::Import(ImportError::Write(message)) => {
                tracing::error!("CSV export failed: {}", message);
                Self::internal_error("An internal error occurred")
            }
            InternalError::Import(e) => Self::bad_request(e.to_string()),
            InternalError::Remote(e) => {
                tracing::warn!("Upstream call failed: {}", e);
                Self::upstream_failed("Upstream service failed")
            }
            InternalError::JWTValidation(_) => Self::unauthorized(),
            other @ (InternalError::Database(_) | InternalError::Parse { .. }) => {
                tracing::error!("Internal error: {}", other);
                Self::internal_error("An internal error occurred")
            }
        }
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::AccessDenied(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::UpstreamFailed(json)
            | ApiError::PageUnavailable(json)
            | ApiError::InternalError(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.response().message.clone()
    }

    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
