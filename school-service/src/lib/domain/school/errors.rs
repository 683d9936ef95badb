use thiserror::Error;
use tokio::task::JoinError;

use crate::school::models::EditRequestId;
use crate::school::models::SchoolId;

/// Error for SchoolName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchoolNameError {
    #[error("School name must not be blank")]
    Blank,
}

/// Top-level error for all school-related operations
#[derive(Debug, Clone, Error)]
pub enum SchoolError {
    // Input validation errors (automatically converted via #[from])
    #[error("Invalid school name: {0}")]
    InvalidName(#[from] SchoolNameError),

    #[error(transparent)]
    Validation(#[from] auth::ValidationError),

    // Domain-level errors
    #[error("School with such name already exists: {0}")]
    DuplicateName(String),

    #[error("Wrong password")]
    WrongPassword,

    #[error("No such school exists or it was deleted: {0}")]
    NotFound(SchoolId),

    #[error("No such edit request: {0}")]
    EditRequestNotFound(EditRequestId),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<JoinError> for SchoolError {
    fn from(err: JoinError) -> Self {
        SchoolError::Unknown(format!("Blocking task failed: {}", err))
    }
}
