//! Admin authentication: password hashing, session tokens, and the request extractor.

pub mod password;
mod session;
mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use session::{AdminSession, Authenticator};
pub use token::{Claims, TokenError, TokenIssuer};
