use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Lifetime of a token when the caller does not ask for one.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Token type label reported to clients alongside the token.
pub const TOKEN_TYPE: &str = "bearer";

/// A freshly minted access token, ready to hand to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies stateless access tokens.
///
/// Tokens are HS256-signed JWTs carrying [`Claims`]. There is no server-side
/// registry: a token stays valid until its `exp`, whatever happens to the
/// account afterwards.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenService {
    /// Create a new token service with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// TokenService using HS256 and a 30 minute default lifetime
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            default_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    /// Override the lifetime used by [`issue`](Self::issue) when no explicit
    /// TTL is given.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// The lifetime applied when no explicit TTL is given.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Mint a token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Username the token vouches for
    /// * `ttl` - Lifetime; falls back to the default TTL when `None`
    ///
    /// # Returns
    /// Signed token with its type label and expiry
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed, or the TTL pushes the
    ///   expiry outside the representable range
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<IssuedToken, JwtError> {
        let issued_at = Utc::now();
        let ttl = ttl.unwrap_or(self.default_ttl);
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::EncodingFailed("ttl out of range".to_string()))?;
        let claims = Claims::new(subject, issued_at, expires_at);

        let access_token = self.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE,
            expires_at,
        })
    }

    /// Verify a token and recover its claims.
    ///
    /// Signature, structure, required claims and expiry are all checked.
    /// Every failure yields `None`; the reason is only logged.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    ///
    /// # Returns
    /// Claims of a valid, unexpired token
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match self.decode(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Access token rejected");
                None
            }
        }
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token, keeping the failure reason.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is at or before the current second
    /// * `InvalidToken` - Signature mismatch or unexpected algorithm
    /// * `MissingClaim` - `sub` or `exp` absent
    /// * `DecodingFailed` - Token is structurally malformed
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        JwtError::InvalidToken(e.to_string())
                    }
                    ErrorKind::MissingRequiredClaim(claim) => {
                        JwtError::MissingClaim(claim.clone())
                    }
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        // jsonwebtoken still accepts a token in its expiry second
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}
