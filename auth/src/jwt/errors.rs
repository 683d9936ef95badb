use jsonwebtoken::errors::Error as JwtLibError;
use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Why a session token was not accepted.
///
/// The kinds exist for logging and tests. Callers facing the network collapse
/// them into a single rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}

impl From<JwtLibError> for TokenError {
    fn from(err: JwtLibError) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}
