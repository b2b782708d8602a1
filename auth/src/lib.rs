//! Authentication utilities library
//!
//! Provides the credential primitives used by the account service:
//! - Password hashing (bcrypt, configurable cost factor)
//! - JWT issuance and validation (HS256)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(4).unwrap();
//! let hash = hasher.hash("Password123!").unwrap();
//! assert!(hasher.verify("Password123!", &hash).unwrap());
//! assert!(!hasher.verify("wrong", &hash).unwrap());
//! ```
//!
//! ## Issuing Tokens
//! ```
//! use auth::{Authenticator, Claims, PasswordHasher};
//!
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     PasswordHasher::new(4).unwrap(),
//! );
//!
//! let hash = auth.hash_password("Password123!").unwrap();
//!
//! let claims = auth.claims_for("user123", "john@example.com");
//! let result = auth.authenticate("Password123!", &hash, &claims).unwrap();
//!
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.email, "john@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
