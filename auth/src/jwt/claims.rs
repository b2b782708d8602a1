use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an issued access token.
///
/// Serialized as `{ "id", "email", "iat", "exp" }` so consumers that expect
/// the flat identity payload can read the token without a custom mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub id: String,

    /// Email the user signed up with
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, issued now and expiring after `ttl`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email address
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with id, email, iat, and exp set
    pub fn for_user(user_id: impl ToString, email: impl ToString, ttl: Duration) -> Self {
        Self::issued_at(user_id, email, Utc::now(), ttl)
    }

    /// Create claims for a user issued at an explicit instant.
    pub fn issued_at(
        user_id: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}
