use thiserror::Error;

/// Storage failures; details are logged, never shown to API callers
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database operation '{operation}' failed: {source}")]
    Operation {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Could not open transaction: {source}")]
    TransactionBegin {
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Could not commit transaction, nothing was written: {source}")]
    TransactionCommit {
        #[source]
        source: sea_orm::DbErr,
    },
}
