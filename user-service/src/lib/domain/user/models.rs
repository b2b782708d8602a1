use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use email_address::Options;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;

/// User aggregate entity.
///
/// Represents a registered account as persisted, including the password hash.
/// Never hand this type to a caller outside the domain; convert it into a
/// [`UserProfile`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Ensures the name is 3-255 characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 255;

    /// Create a new valid name.
    ///
    /// # Errors
    /// * `TooShort` - Name shorter than 3 characters
    /// * `TooLong` - Name longer than 255 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates a bare `local@domain.tld` address. Display names such as
/// `John <john@example.com>`, domain literals and single-label domains are
/// rejected. The address is kept exactly as supplied; uniqueness is
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `TooLong` - Email longer than 255 characters
    /// * `InvalidFormat` - Email is not a bare address with a dotted domain
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::parse_with_options(&email, Self::parse_options())
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parse_options() -> Options {
        Options::default()
            .without_display_text()
            .without_domain_literal()
            .with_required_tld()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at signup.
///
/// Enforces the signup password policy. The value is redacted from `Debug`
/// output so it cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(String);

impl PlainPassword {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 20;
    const SPECIAL_CHARACTERS: &'static str = "!@#$%^&*(),.?\":{}|<>";

    /// Validate a candidate password against every policy rule.
    ///
    /// # Errors
    /// One entry per violated rule, in a stable order.
    pub fn new(password: String) -> Result<Self, Vec<PasswordPolicyError>> {
        let mut violations = Vec::new();
        let length = password.chars().count();

        if length < Self::MIN_LENGTH {
            violations.push(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if length > Self::MAX_LENGTH {
            violations.push(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PasswordPolicyError::MissingDigit);
        }
        if !password
            .chars()
            .any(|c| Self::SPECIAL_CHARACTERS.contains(c))
        {
            violations.push(PasswordPolicyError::MissingSpecialCharacter);
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            violations.push(PasswordPolicyError::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            violations.push(PasswordPolicyError::MissingLowercase);
        }

        if violations.is_empty() {
            Ok(Self(password))
        } else {
            Err(violations)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(<redacted>)")
    }
}

/// Fields supplied by the signup workflow for a user that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Publicly visible view of a user.
///
/// Has no password field, so a hash can never be returned by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: PlainPassword,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `name` - Validated display name
    /// * `email` - Validated email address
    /// * `password` - Policy-checked plaintext password (hashed by the service)
    pub fn new(name: UserName, email: EmailAddress, password: PlainPassword) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to log a user in.
///
/// The password is not policy-checked: any non-empty value is compared
/// against the stored hash.
pub struct AuthenticateCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl AuthenticateCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for AuthenticateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticateCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed bearer token issued on successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
}
