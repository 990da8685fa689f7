//! Salted password hashing with bcrypt.

use bcrypt::{BcryptError, hash, verify};

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Cost used for sign-ups unless configured otherwise.
    pub const DEFAULT_COST: u32 = 10;

    /// Hash `raw_password` with `cost` rounds.
    ///
    /// bcrypt accepts costs between 4 and 31.
    pub fn from_raw_password(raw_password: &str, cost: u32) -> Result<Self, BcryptError> {
        hash(raw_password, cost).map(Self)
    }

    /// Wrap a hash that was read back from storage.
    pub fn from_stored(stored_hash: &str) -> Self {
        Self(stored_hash.to_string())
    }

    /// Check that `raw_password` matches the stored password.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps these tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_is_salted() {
        let first = PasswordHash::from_raw_password("secret1", TEST_COST).unwrap();
        let second = PasswordHash::from_raw_password("secret1", TEST_COST).unwrap();

        assert_ne!(first, second);
        assert_ne!(first.as_ref(), "secret1");
    }

    #[test]
    fn test_verify_matches_only_the_original_password() {
        let hash = PasswordHash::from_raw_password("secret1", TEST_COST).unwrap();

        assert!(hash.verify("secret1").unwrap());
        assert!(!hash.verify("secret2").unwrap());
    }

    #[test]
    fn test_stored_hash_round_trips_through_storage() {
        let hash = PasswordHash::from_raw_password("secret1", TEST_COST).unwrap();
        let stored = PasswordHash::from_stored(&hash.clone().into_string());

        assert!(stored.verify("secret1").unwrap());
    }

    #[test]
    fn test_default_cost_is_embedded_in_hash() {
        let hash = PasswordHash::from_raw_password("secret1", PasswordHash::DEFAULT_COST).unwrap();
        assert!(hash.as_ref().starts_with("$2b$10$"));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(PasswordHash::from_raw_password("secret1", 2).is_err());
    }

    #[test]
    fn test_verify_against_garbage_hash_is_an_error() {
        let hash = PasswordHash::from_stored("not-a-bcrypt-hash");
        assert!(hash.verify("secret1").is_err());
    }
}
