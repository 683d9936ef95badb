use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Refusing to hash an empty password")]
    EmptyPassword,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
