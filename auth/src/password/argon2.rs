use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Salted, deliberately slow password hashing.
///
/// Digests are Argon2id PHC strings: algorithm, parameters and salt travel
/// with the hash, so verification needs nothing but the stored string.
///
/// Both operations are CPU-bound and synchronous. Async callers should move
/// them off the request-dispatch thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password, already checked by the credential validator
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }

        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest is recomputed with the salt and parameters embedded in
    /// `hash` and compared in constant time by the `password-hash` crate.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True only on an exact match. A hash that cannot be parsed is a
    /// verification failure, not an error.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "password1";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("password2", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same_password").expect("Failed to hash password");
        let second = hasher.hash("same_password").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("same_password", &first));
        assert!(hasher.verify("same_password", &second));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("plaintext_marker").expect("Failed to hash password");

        assert!(!hash.contains("plaintext_marker"));
    }

    #[test]
    fn test_hash_rejects_empty_password() {
        let hasher = PasswordHasher::new();
        assert_eq!(hasher.hash(""), Err(PasswordError::EmptyPassword));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$m=19456,t=2,p=1$broken"));
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("Password1").expect("Failed to hash password");

        assert!(!hasher.verify("password1", &hash));
    }
}
