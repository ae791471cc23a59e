//! Password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::AppError;

/// Credential verification capability.
///
/// Stored credentials are salted Argon2id hashes; verification is
/// constant-time. Equality comparison against a stored password is never
/// an acceptable implementation of this trait.
pub trait CredentialVerifier: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AppError>;
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, AppError>;
}

/// Argon2id with the crate's default parameters. Verification reads the
/// parameters embedded in the stored PHC string.
pub struct Argon2Credentials;

impl CredentialVerifier for Argon2Credentials {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Credential(format!("hash password: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| AppError::Credential(format!("parse stored hash: {e}")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_its_own_input() {
        let creds = Argon2Credentials;
        let hash = creds.hash("hunter2").unwrap();

        assert!(!hash.is_empty());
        assert!(creds.verify("hunter2", &hash).unwrap());
        assert!(!creds.verify("hunter3", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let creds = Argon2Credentials;
        let first = creds.hash("same_password").unwrap();
        let second = creds.hash("same_password").unwrap();

        // Fresh salt every time
        assert_ne!(first, second);
        assert!(creds.verify("same_password", &first).unwrap());
        assert!(creds.verify("same_password", &second).unwrap());
    }

    #[test]
    fn garbage_stored_hash_is_an_error_not_a_match() {
        let creds = Argon2Credentials;
        assert!(creds.verify("anything", "not-a-phc-string").is_err());
    }
}
