use thiserror::Error;

/// Error type for JWT operations.
///
/// Only surfaced by the lower-level [`TokenService::encode`] and
/// [`TokenService::decode`]; [`TokenService::verify`] folds every variant
/// into a single `None`.
///
/// [`TokenService::encode`]: super::TokenService::encode
/// [`TokenService::decode`]: super::TokenService::decode
/// [`TokenService::verify`]: super::TokenService::verify
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
