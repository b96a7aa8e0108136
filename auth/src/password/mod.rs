pub mod bcrypt;
pub mod errors;
pub mod normalize;

pub use self::bcrypt::PasswordHasher;
pub use errors::PasswordError;
pub use normalize::normalize;
pub use normalize::MAX_PASSWORD_BYTES;
