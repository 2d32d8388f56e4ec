// Password hashing using Argon2id
// Decision: Use Argon2id as it's the recommended algorithm for password hashing
// Decision: Use default parameters which are secure for most use cases
// Decision: Unknown-email logins still run a verification so both failure paths cost the same

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::OnceLock;

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    Ok(hash.to_string())
}

/// Verify a password against a hash.
///
/// The digest comparison inside argon2 is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Burn one verification against a throwaway hash.
///
/// Called when a login names an unknown email so the response time does not
/// reveal whether the account exists. Always returns `false`.
pub fn verify_against_dummy(password: &str) -> bool {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let hash = DUMMY_HASH.get_or_init(|| hash_password("sparkbytes-dummy-password").ok());
    if let Some(hash) = hash {
        let _ = verify_password(password, hash);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "Password123";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("Password124", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_fresh_salt() {
        let hash1 = hash_password("Password123").unwrap();
        let hash2 = hash_password("Password123").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("Password123", &hash1).unwrap());
        assert!(verify_password("Password123", &hash2).unwrap());
    }

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hash = hash_password("Password123").unwrap();
        assert_ne!(hash, "Password123");
        assert!(!hash.contains("Password123"));
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("Password123", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_dummy_verification_never_succeeds() {
        assert!(!verify_against_dummy("sparkbytes-dummy-password"));
        assert!(!verify_against_dummy("anything"));
    }
}
