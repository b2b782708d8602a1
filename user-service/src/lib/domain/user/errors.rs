use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for UserName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name should be at least {min} characters")]
    TooShort { min: usize, actual: usize },

    #[error("Name must be at most {max} characters")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format")]
    InvalidFormat(String),

    #[error("Email must be at most {max} characters")]
    TooLong { max: usize, actual: usize },
}

/// A single signup password rule that was not met
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Password must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Password must contain at least 1 number")]
    MissingDigit,

    #[error("Password must contain at least 1 special character")]
    MissingSpecialCharacter,

    #[error("Password must contain at least 1 uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least 1 lowercase letter")]
    MissingLowercase,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Expected outcomes, surfaced to the caller as-is
    #[error("User already exists")]
    AlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Internal errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl UserError {
    /// True for failures the caller cannot correct (store, hasher or issuer faults).
    pub fn is_internal(&self) -> bool {
        !matches!(self, UserError::AlreadyExists | UserError::InvalidCredentials)
    }
}
