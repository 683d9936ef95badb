pub mod claims;
pub mod errors;
pub mod token_service;

pub use claims::SessionClaims;
pub use claims::SESSION_LIFETIME_HOURS;
pub use errors::TokenError;
pub use token_service::TokenService;
