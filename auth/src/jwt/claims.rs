use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;
use crate::account::AccountId;

/// Fixed lifetime of a session token.
pub const SESSION_LIFETIME_HOURS: i64 = 24;

/// Claim set of a session token.
///
/// All three claims are required; a token missing any of them does not parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (account identifier, decimal string)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for an account, valid for one day from `issued_at`.
    ///
    /// # Arguments
    /// * `account_id` - Account the token will authenticate
    /// * `issued_at` - Issuance instant
    ///
    /// # Returns
    /// Claims with sub, iat, and exp set
    pub fn for_account(account_id: AccountId, issued_at: DateTime<Utc>) -> Self {
        let expiration = issued_at + Duration::hours(SESSION_LIFETIME_HOURS);

        Self {
            sub: account_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Parse the subject back into an account id.
    ///
    /// # Errors
    /// * `Malformed` - Subject is not a decimal account id
    pub fn account_id(&self) -> Result<AccountId, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Malformed)
    }

    /// A token is expired from its `exp` instant onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
