use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Language parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LanguageError {
    #[error("Unsupported language '{0}' (expected 'en' or 'fa')")]
    Unsupported(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid language: {0}")]
    InvalidLanguage(#[from] LanguageError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    // Domain-level errors
    #[error("User not found with username: {0}")]
    NotFoundByUsername(String),

    #[error("Username already registered: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    #[error("Incorrect username or password")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<tokio::task::JoinError> for UserError {
    fn from(err: tokio::task::JoinError) -> Self {
        UserError::Unknown(format!("Blocking task failed: {}", err))
    }
}
