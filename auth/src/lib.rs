//! Authentication and authorization core
//!
//! - Password hashing (Argon2id)
//! - Session token issuance and validation (HS256 JWT, one-day lifetime)
//! - Registration credential validation
//! - The access gate: session-token gate for account holders, shared-secret
//!   gate for the operator
//!
//! Secrets are passed in at construction and never change afterwards; rotating
//! either one means restarting the process.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{AccountId, TokenService};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let token = tokens.issue(AccountId(7)).unwrap();
//! assert_eq!(tokens.verify(&token), Ok(AccountId(7)));
//! ```
//!
//! ## Gating Requests
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AccessGate, AccountId, AdminSecret, AuthDecision, Rejection, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(b"secret_key_at_least_32_bytes_long!"));
//! let gate = AccessGate::new(Arc::clone(&tokens), AdminSecret::new("operator".to_string()));
//!
//! let token = tokens.issue(AccountId(7)).unwrap();
//! assert_eq!(gate.require_session(Some(&token)), AuthDecision::Session(AccountId(7)));
//! assert_eq!(gate.require_admin_secret(Some("operator")), AuthDecision::Admin);
//!
//! let reason = gate.require_admin_secret(Some("Operator")).into_admin().unwrap_err();
//! assert_eq!(reason.rejection(), Rejection::Unauthorized);
//! ```

pub mod account;
pub mod authenticator;
pub mod credentials;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use account::AccountId;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use credentials::CredentialValidator;
pub use credentials::CredentialViolation;
pub use credentials::ValidationError;
pub use gate::AccessGate;
pub use gate::AdminSecret;
pub use gate::AuthDecision;
pub use gate::RejectReason;
pub use gate::Rejection;
pub use jwt::SessionClaims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
