//! Access policy for the two trust domains: account holders carrying a
//! session token, and the single operator holding the admin secret.
//!
//! Both gates are pure decision functions. They never touch storage and never
//! fail; every input maps to an [`AuthDecision`].

use std::fmt;
use std::sync::Arc;

use secrecy::ExposeSecret;
use secrecy::SecretString;
use subtle::ConstantTimeEq;

use crate::account::AccountId;
use crate::jwt::TokenError;
use crate::jwt::TokenService;

/// Outcome of running a request through one of the gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// A valid session token resolved to this account.
    Session(AccountId),
    /// The admin secret matched.
    Admin,
    Reject(RejectReason),
}

impl AuthDecision {
    /// The authenticated account, if this decision admits an account-scoped route.
    pub fn into_session(self) -> Result<AccountId, RejectReason> {
        match self {
            AuthDecision::Session(account_id) => Ok(account_id),
            AuthDecision::Admin => Err(RejectReason::NotASession),
            AuthDecision::Reject(reason) => Err(reason),
        }
    }

    /// Whether this decision admits an administrative route.
    pub fn into_admin(self) -> Result<(), RejectReason> {
        match self {
            AuthDecision::Admin => Ok(()),
            AuthDecision::Session(_) => Err(RejectReason::NotAdmin),
            AuthDecision::Reject(reason) => Err(reason),
        }
    }
}

/// Internal cause of a rejection. Only [`Rejection`] is shown to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    MissingToken,
    InvalidToken(TokenError),
    WrongAdminSecret,
    /// An admin decision was offered where a session was required.
    NotASession,
    /// A session decision was offered where the admin secret was required.
    NotAdmin,
}

impl RejectReason {
    pub fn rejection(&self) -> Rejection {
        match self {
            RejectReason::MissingToken
            | RejectReason::InvalidToken(_)
            | RejectReason::NotASession => Rejection::Forbidden,
            RejectReason::WrongAdminSecret | RejectReason::NotAdmin => Rejection::Unauthorized,
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingToken => f.write_str("missing session token"),
            RejectReason::InvalidToken(err) => write!(f, "invalid session token: {}", err),
            RejectReason::WrongAdminSecret => f.write_str("wrong admin secret"),
            RejectReason::NotASession => f.write_str("admin decision used on a session route"),
            RejectReason::NotAdmin => f.write_str("session decision used on an admin route"),
        }
    }
}

/// What a rejected client is told.
///
/// The session gate always answers `Forbidden` whatever went wrong with the
/// token; the admin gate answers `Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Forbidden,
    Unauthorized,
}

/// The operator's shared secret.
///
/// Compared as exact bytes: case-sensitive, no trimming, no normalization.
#[derive(Debug)]
pub struct AdminSecret(SecretString);

impl AdminSecret {
    pub fn new(secret: String) -> Self {
        Self(SecretString::new(secret))
    }

    /// Constant-time equality against a client-supplied value.
    pub fn matches(&self, supplied: &str) -> bool {
        self.0
            .expose_secret()
            .as_bytes()
            .ct_eq(supplied.as_bytes())
            .into()
    }
}

/// Decides whether a request may reach an account-scoped or administrative route.
///
/// Holds the token service and admin secret for the process lifetime; both are
/// read-only after construction, so one gate is shared across all requests.
pub struct AccessGate {
    tokens: Arc<TokenService>,
    admin_secret: AdminSecret,
}

impl AccessGate {
    pub fn new(tokens: Arc<TokenService>, admin_secret: AdminSecret) -> Self {
        Self {
            tokens,
            admin_secret,
        }
    }

    /// Bearer-token gate.
    ///
    /// # Arguments
    /// * `token` - The `token` field of the request body, if any
    ///
    /// # Returns
    /// `Session(account_id)` for a valid token, `Reject` otherwise. An empty
    /// string counts as no token.
    pub fn require_session(&self, token: Option<&str>) -> AuthDecision {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return AuthDecision::Reject(RejectReason::MissingToken),
        };

        match self.tokens.verify(token) {
            Ok(account_id) => AuthDecision::Session(account_id),
            Err(err) => AuthDecision::Reject(RejectReason::InvalidToken(err)),
        }
    }

    /// Shared-secret gate.
    ///
    /// # Arguments
    /// * `supplied` - The secret taken from the request path, if any
    ///
    /// # Returns
    /// `Admin` iff `supplied` equals the configured secret exactly.
    pub fn require_admin_secret(&self, supplied: Option<&str>) -> AuthDecision {
        match supplied {
            Some(supplied) if self.admin_secret.matches(supplied) => AuthDecision::Admin,
            _ => AuthDecision::Reject(RejectReason::WrongAdminSecret),
        }
    }
}
