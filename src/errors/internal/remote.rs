use thiserror::Error;

/// Failures talking to another HTTP service
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} returned status {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Response from {url} could not be decoded: {message}")]
    Decode { url: String, message: String },

    #[error("Request to {url} was cancelled")]
    Cancelled { url: String },
}
