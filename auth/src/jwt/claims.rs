use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an access token.
///
/// `sub` and `exp` are mandatory: a token lacking either does not
/// deserialize and is treated as invalid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create claims for a subject minted at `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Username the token vouches for
    /// * `issued_at` - Instant the token is minted
    /// * `expires_at` - Instant the token stops being valid
    pub fn new(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
            iat: Some(issued_at.timestamp()),
        }
    }

    /// Create claims for a subject expiring `ttl` from now.
    ///
    /// Returns `None` when the expiry falls outside chrono's range.
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Option<Self> {
        let issued_at = Utc::now();
        let expires_at = issued_at.checked_add_signed(ttl)?;
        Some(Self::new(subject, issued_at, expires_at))
    }

    /// Get the subject.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Expiration as a timestamp, if it fits chrono's range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if token is expired.
    ///
    /// A token is no longer valid at the second it expires.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
