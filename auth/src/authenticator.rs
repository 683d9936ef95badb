use std::sync::Arc;

use crate::account::AccountId;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Stand-in digest checked when a login names no existing account.
///
/// Argon2id with the default cost, so the failed lookup costs as much as a
/// wrong password for a real account. No password matches it.
const UNKNOWN_ACCOUNT_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$o4E1Ur3dJVMRUaesMrd1XQ$3038fKOwkJthH/SzlfHWA34QoVJkYOQV8wfS+gdQ+2Q";

/// Authentication coordinator combining password verification and token issuance.
///
/// Provides the login flow ("check the password, then hand out a session
/// token") and password hashing for registration.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Wrong password")]
    WrongPassword,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `tokens` - Token service shared with the access gate
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            tokens,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hashed password string
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `account_id` - Account the token is issued for
    ///
    /// # Returns
    /// Signed session token
    ///
    /// # Errors
    /// * `WrongPassword` - Password does not match, or the stored hash is unreadable
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        account_id: AccountId,
    ) -> Result<String, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::WrongPassword);
        }

        Ok(self.tokens.issue(account_id)?)
    }

    /// Fail a login for an account that does not exist.
    ///
    /// Runs a full verification against a stand-in digest first, so callers
    /// cannot tell a missing account from a wrong password by latency.
    ///
    /// # Errors
    /// * `WrongPassword` - Always
    pub fn reject_unknown_account(&self, password: &str) -> Result<String, AuthenticationError> {
        let _ = self.password_hasher.verify(password, UNKNOWN_ACCOUNT_HASH);
        Err(AuthenticationError::WrongPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> (Authenticator, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(b"test_secret_key_at_least_32_bytes!"));
        (Authenticator::new(Arc::clone(&tokens)), tokens)
    }

    #[test]
    fn test_authenticate_success() {
        let (authenticator, tokens) = authenticator();

        let hash = authenticator
            .hash_password("password1")
            .expect("Failed to hash password");

        let token = authenticator
            .authenticate("password1", &hash, AccountId(9))
            .expect("Authentication failed");

        assert_eq!(tokens.verify(&token), Ok(AccountId(9)));
    }

    #[test]
    fn test_authenticate_wrong_password() {
        let (authenticator, _) = authenticator();

        let hash = authenticator
            .hash_password("password1")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("password2", &hash, AccountId(9));
        assert_eq!(result, Err(AuthenticationError::WrongPassword));
    }

    #[test]
    fn test_unknown_account_is_wrong_password() {
        let (authenticator, _) = authenticator();

        assert_eq!(
            authenticator.reject_unknown_account("password1"),
            Err(AuthenticationError::WrongPassword)
        );
    }

    #[test]
    fn test_unknown_account_hash_has_default_cost() {
        let parsed = ::argon2::PasswordHash::new(UNKNOWN_ACCOUNT_HASH)
            .expect("Stand-in hash must parse, or verification short-circuits");
        let defaults = ::argon2::Argon2::default();

        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert_eq!(parsed.params.get_decimal("m"), Some(defaults.params().m_cost()));
        assert_eq!(parsed.params.get_decimal("t"), Some(defaults.params().t_cost()));
        assert_eq!(parsed.params.get_decimal("p"), Some(defaults.params().p_cost()));
        assert_eq!(parsed.hash.map(|h| h.len()), Some(32));
    }

    #[test]
    fn test_authenticate_corrupt_hash() {
        let (authenticator, _) = authenticator();

        let result = authenticator.authenticate("password1", "not-a-phc-string", AccountId(9));
        assert_eq!(result, Err(AuthenticationError::WrongPassword));
    }
}
