//! Password hashing
//!
//! A single unsalted SHA-256 pass over the plaintext; verification recomputes
//! the digest and compares.

use sha2::{Digest, Sha256};

/// Hash a plaintext password
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check a plaintext password against a stored hash
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    stored_hash == hash_password(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_password("hunter22"), hash_password("hunter22"));
    }

    #[test]
    fn test_hash_is_lowercase_hex_digest() {
        let hash = hash_password("hunter22");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_verify_accepts_matching_password() {
        let hash = hash_password("correct horse battery staple");
        assert!(verify_password(&hash, "correct horse battery staple"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("correct horse battery staple");
        assert!(!verify_password(&hash, "incorrect horse"));
    }
}
