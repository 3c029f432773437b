use thiserror::Error;

#[derive(Error, Debug)]
pub enum SppgError {
    #[error("SPPG record not found: {0}")]
    RecordNotFound(String),

    #[error("SPPG record already exists: {0}")]
    DuplicateId(String),

    #[error("Invalid SPPG id '{0}': expected 8 letters")]
    InvalidId(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("nama_sppg must not be empty")]
    MissingName,

    #[error("Update must carry prog_stat or reff_attention")]
    EmptyUpdate,
}
