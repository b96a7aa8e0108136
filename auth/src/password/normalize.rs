use std::borrow::Cow;

use sha2::Digest;
use sha2::Sha256;

/// Input ceiling of bcrypt, in bytes. Anything past it is silently ignored by
/// the primitive.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Bring a secret within bcrypt's input ceiling.
///
/// Secrets of at most [`MAX_PASSWORD_BYTES`] bytes pass through untouched.
/// Longer ones are replaced by the lowercase hex SHA-256 digest of their raw
/// bytes (64 bytes), so two long secrets sharing a 72-byte prefix no longer
/// collide. The length is measured in bytes, not characters.
///
/// Must be applied identically when hashing and when verifying.
///
/// # Arguments
/// * `secret` - Raw secret bytes
///
/// # Returns
/// The secret itself, or its hex digest when it is too long
pub fn normalize(secret: &[u8]) -> Cow<'_, [u8]> {
    if secret.len() > MAX_PASSWORD_BYTES {
        let digest = Sha256::digest(secret);
        Cow::Owned(hex::encode(digest).into_bytes())
    } else {
        Cow::Borrowed(secret)
    }
}
