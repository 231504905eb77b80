//! Authentication module
//!
//! - [`JwtService`] - JWT token service
//! - [`CurrentUser`] - authenticated caller context
//! - [`require_auth`] - authentication middleware
//! - [`password`] - Argon2 hashing

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, TokenKind, TokenPair};
pub use middleware::require_auth;

use shared::error::AppError;

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::GenerationFailed(msg) => AppError::internal(msg),
            JwtError::InvalidToken(_) | JwtError::InvalidSignature => {
                AppError::invalid_token("Invalid token")
            }
        }
    }
}
