//! Session token generation
//!
//! The raw token goes to the client once; only its SHA-256 hash is stored.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Token length in random bytes (hex-encoded to twice as many chars)
const TOKEN_BYTES: usize = 32;

pub fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; TOKEN_BYTES] = rng.gen();
    hex::encode(bytes)
}

/// Hash a session token for storage using SHA-256
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_hex() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_stable_and_differs_from_token() {
        let token = generate_session_token();
        assert_eq!(hash_session_token(&token), hash_session_token(&token));
        assert_ne!(hash_session_token(&token), token);
        assert_eq!(hash_session_token(&token).len(), 64);
    }
}
