//! Credential authentication library
//!
//! Provides the authentication core of the LocalMate API:
//! - Password hashing (bcrypt, with SHA-256 pre-hashing past 72 bytes)
//! - Access token issuance and validation (HS256 JWT)
//! - Authentication coordination
//!
//! Both halves are synchronous and hold no shared mutable state. bcrypt is
//! deliberately slow, so async callers should run it on a blocking pool.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4).unwrap();
//! let hash = hasher.hash("correct horse battery staple").unwrap();
//! assert!(hasher.verify("correct horse battery staple", &hash));
//! assert!(!hasher.verify("wrong password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let issued = tokens.issue("alice", Some(Duration::seconds(60))).unwrap();
//! let claims = tokens.verify(&issued.access_token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     PasswordHasher::with_cost(4).unwrap(),
//!     Duration::minutes(30),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "alice").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
