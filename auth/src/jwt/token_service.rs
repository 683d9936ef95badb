use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::TokenError;
use crate::account::AccountId;

/// Issues and verifies stateless session tokens.
///
/// Tokens are HS256 JWTs signed with a process-wide secret loaded once at
/// startup. Nothing is stored server-side: a token stops working when it
/// expires or when the process restarts with a different secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `verify_at`, without leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a session token for an account, valid for one day from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, account_id: AccountId) -> Result<String, TokenError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Issue a session token as if the current time were `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_at(
        &self,
        account_id: AccountId,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = SessionClaims::for_account(account_id, issued_at);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a session token and return the account it was issued for.
    ///
    /// The account is not looked up; whether it still exists is the caller's
    /// concern.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed or lacks a numeric subject
    /// * `InvalidSignature` - Token was tampered with or signed under another key
    /// * `Expired` - Current time is at or past the token's expiry
    pub fn verify(&self, token: &str) -> Result<AccountId, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a session token against an explicit clock.
    ///
    /// # Errors
    /// Same as [`TokenService::verify`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AccountId, TokenError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = token_data.claims;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        claims.account_id()
    }
}
