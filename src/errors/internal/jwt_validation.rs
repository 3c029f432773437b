use thiserror::Error;

/// Reasons a bearer token is not accepted as an identity
#[derive(Error, Debug)]
pub enum JWTValidationError {
    #[error("JWT has expired")]
    Expired,

    #[error("JWT signature is invalid")]
    InvalidSignature,

    #[error("JWT is malformed: {source}")]
    Malformed {
        #[source]
        source: jsonwebtoken::errors::Error,
    },
}

impl From<jsonwebtoken::errors::Error> for JWTValidationError {
    fn from(source: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match source.kind() {
            ErrorKind::ExpiredSignature => JWTValidationError::Expired,
            ErrorKind::InvalidSignature => JWTValidationError::InvalidSignature,
            _ => JWTValidationError::Malformed { source },
        }
    }
}
