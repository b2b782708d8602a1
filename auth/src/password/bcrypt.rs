use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides salted one-way password hashing (internally uses bcrypt) with a
/// configurable work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Lowest work factor bcrypt accepts.
    pub const MIN_COST: u32 = 4;
    /// Highest work factor bcrypt accepts.
    pub const MAX_COST: u32 = 31;
    /// Work factor used when none is configured.
    pub const DEFAULT_COST: u32 = 10;

    /// Create a new password hasher with the given work factor.
    ///
    /// # Arguments
    /// * `cost` - bcrypt cost (each increment doubles hashing time)
    ///
    /// # Returns
    /// PasswordHasher configured with `cost`
    ///
    /// # Errors
    /// * `InvalidCost` - Cost is outside `MIN_COST..=MAX_COST`
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost {
                cost,
                min: Self::MIN_COST,
                max: Self::MAX_COST,
            });
        }
        Ok(Self { cost })
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is generated for every call, so hashing the same
    /// password twice yields different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$<cost>$<salt+digest>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(PasswordHasher::MIN_COST).expect("minimum cost is valid")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "Password123!";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert_ne!(hash, password);

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("wrong", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();

        let first = hasher.hash("Password123!").unwrap();
        let second = hasher.hash("Password123!").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_embeds_cost() {
        let hasher = PasswordHasher::new(5).unwrap();
        let hash = hasher.hash("Password123!").unwrap();

        assert!(hash.starts_with("$2b$05$"));
    }

    #[test]
    fn test_round_trip_across_costs() {
        for cost in PasswordHasher::MIN_COST..=6 {
            let hasher = PasswordHasher::new(cost).unwrap();
            let hash = hasher.hash("Abcdef1!").unwrap();
            assert!(hasher.verify("Abcdef1!", &hash).unwrap());
            assert!(!hasher.verify("Abcdef1?", &hash).unwrap());
        }
    }

    #[test]
    fn test_verify_with_other_cost_hasher() {
        let hash = PasswordHasher::new(4).unwrap().hash("Password123!").unwrap();

        // Cost is read from the hash itself
        assert!(PasswordHasher::default()
            .verify("Password123!", &hash)
            .unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_rejects_out_of_range_cost() {
        assert!(matches!(
            PasswordHasher::new(3),
            Err(PasswordError::InvalidCost { cost: 3, .. })
        ));
        assert!(matches!(
            PasswordHasher::new(32),
            Err(PasswordError::InvalidCost { cost: 32, .. })
        ));
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(
            PasswordHasher::default(),
            PasswordHasher::new(PasswordHasher::DEFAULT_COST).unwrap()
        );
    }
}
