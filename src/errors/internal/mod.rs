use thiserror::Error;

pub mod database;
pub mod import;
pub mod jwt_validation;
pub mod remote;
pub mod settings;
pub mod sppg;

pub use database::DatabaseError;
pub use import::ImportError;
pub use jwt_validation::JWTValidationError;
pub use remote::RemoteError;
pub use settings::SettingsError;
pub use sppg::SppgError;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors (database, parsing) are shared; domain errors have
/// one enum per area. Not exposed via API - endpoints convert to ApiError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Sppg(#[from] SppgError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    JWTValidation(#[from] JWTValidationError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionBegin { source })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionCommit { source })
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }
}
