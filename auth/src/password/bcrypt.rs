use bcrypt::DEFAULT_COST;

use super::errors::PasswordError;
use super::normalize::normalize;

/// Lowest and highest work factors bcrypt accepts.
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Password hashing implementation.
///
/// Hashes with bcrypt after [`normalize`] has brought the secret within the
/// primitive's 72-byte input limit. Holds no mutable state, so one instance
/// can be shared freely between concurrent requests.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher with bcrypt's default cost (12).
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a password hasher with an explicit bcrypt cost.
    ///
    /// Each increment doubles the work. Low values are only meant for tests.
    ///
    /// # Arguments
    /// * `cost` - bcrypt cost factor, 4 to 31
    ///
    /// # Errors
    /// * `InvalidCost` - Cost outside bcrypt's accepted range
    pub fn with_cost(cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    /// The configured bcrypt cost.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is drawn from the OS for every call, so hashing
    /// the same password twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt string (`$2b$<cost>$<salt><digest>`)
    ///
    /// # Errors
    /// * `HashingFailed` - bcrypt rejected the input or salt generation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let normalized = normalize(password.as_bytes());

        bcrypt::hash(normalized.as_ref(), self.cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored bcrypt hash
    ///
    /// # Returns
    /// True if password matches. False on mismatch and on any hash string
    /// bcrypt cannot parse.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let normalized = normalize(password.as_bytes());

        match bcrypt::verify(normalized.as_ref(), hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
