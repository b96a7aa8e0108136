pub mod claims;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use errors::JwtError;
pub use service::IssuedToken;
pub use service::TokenService;
pub use service::DEFAULT_TOKEN_TTL_MINUTES;
pub use service::TOKEN_TYPE;
