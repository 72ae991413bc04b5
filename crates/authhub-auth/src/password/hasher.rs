//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use authhub_core::config::auth::PasswordHashConfig;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;

/// Handles password hashing and verification using Argon2id.
///
/// Hashes are emitted as self-describing PHC strings, so verification
/// always uses the parameters embedded in the stored record rather than
/// the currently configured ones.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Configured Argon2id instance.
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new password hasher from cost configuration.
    pub fn new(config: &PasswordHashConfig) -> AppResult<Self> {
        let params = Params::new(
            config.memory_cost_kib,
            config.time_cost,
            config.parallelism,
            Some(config.output_len),
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a plaintext password using Argon2id with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash record.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    /// A malformed stored record is an error, not a mismatch.
    pub fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::invalid_argument(format!("Invalid password record: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        // Minimum legal costs to keep tests quick.
        PasswordHasher::new(&PasswordHashConfig {
            time_cost: 1,
            memory_cost_kib: 8,
            parallelism: 1,
            output_len: 32,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash_password("correct horse battery staple").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!hasher.verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = fast_hasher();
        let h1 = hasher.hash_password("hunter2").unwrap();
        let h2 = hasher.hash_password("hunter2").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_malformed_record_is_error() {
        let hasher = fast_hasher();
        let err = hasher.verify_password("anything", "not-a-phc-string").unwrap_err();
        assert_eq!(err.kind, authhub_core::error::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_verify_uses_embedded_params() {
        // A record hashed under different costs still verifies.
        let old = PasswordHasher::new(&PasswordHashConfig {
            time_cost: 2,
            memory_cost_kib: 16,
            parallelism: 1,
            output_len: 32,
        })
        .unwrap();
        let hash = old.hash_password("migrate me").unwrap();

        let current = fast_hasher();
        assert!(current.verify_password("migrate me", &hash).unwrap());
    }
}
