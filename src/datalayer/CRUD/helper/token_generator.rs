use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a fresh bearer token for a new session.
///
/// The token is a random UUID v4 (122 bits of entropy) in its hyphenated form.
///
/// # Returns
/// A tuple containing:
/// - The plain-text token (handed to the client once)
/// - The SHA-256 hash of the token (to be stored in the database)
pub fn generate_session_token() -> (String, String) {
    let token = Uuid::new_v4().to_string();
    let hash = hash_token(&token);

    (token, hash)
}

/// Hash a bearer token using SHA-256
///
/// # Returns
/// The hexadecimal representation of the SHA-256 hash
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
