use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV has no header row")]
    MissingHeader,

    #[error("CSV header lacks required column '{0}'")]
    MissingColumn(String),

    #[error("CSV line {line}: {message}")]
    Malformed { line: u64, message: String },

    #[error("CSV write failed: {0}")]
    Write(String),
}
