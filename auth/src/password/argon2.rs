use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id password hasher.
///
/// Produces PHC strings, so the parameters used for a hash travel with it and
/// verification keeps working after the cost is changed.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the argon2 crate's recommended parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a hasher with explicit Argon2id cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are outside the ranges Argon2 accepts
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match the hash
    /// * `MalformedHash` - Stored hash cannot be parsed
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|e| match e {
                argon2::password_hash::Error::Password => PasswordError::Mismatch,
                other => PasswordError::MalformedHash(other.to_string()),
            })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
