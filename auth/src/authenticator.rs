use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and access token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Always "bearer"
    pub token_type: &'static str,
    /// Instant the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for AuthenticationResult {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_at: token.expires_at,
        }
    }
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `password_hasher` - Hasher used for stored credentials
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8], password_hasher: PasswordHasher, token_ttl: Duration) -> Self {
        Self {
            password_hasher,
            token_service: TokenService::new(jwt_secret).with_default_ttl(token_ttl),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Username to put in the token
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match, or the stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject)?.into())
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, when the password has just been set.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.token_service.issue(subject, None)
    }

    /// Validate an access token.
    ///
    /// # Returns
    /// Decoded claims, or `None` for any expired, tampered or malformed token
    pub fn validate_token(&self, token: &str) -> Option<Claims> {
        self.token_service.verify(token)
    }
}
