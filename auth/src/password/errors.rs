use thiserror::Error;

/// Error type for password operations.
///
/// Verification never fails with an error: a mismatching, malformed or
/// foreign-scheme hash is reported as `false` by [`PasswordHasher::verify`].
///
/// [`PasswordHasher::verify`]: super::PasswordHasher::verify
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Unsupported bcrypt cost {0} (allowed range 4-31)")]
    InvalidCost(u32),
}
