use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Well-formed Argon2id digest with default cost parameters that no password
/// matches. Verifying against it costs as much as verifying a real digest.
pub const DECOY_DIGEST: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZGVjb3ktc2FsdC12YWx1ZQ$veuboir4+nPln+fE08SK4RZWF912xyB3PN9svDOpHdc";

/// One-way credential hashing.
///
/// Uses Argon2id with its default cost parameters and a fresh random salt per
/// hash, so hashing the same password twice yields different digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialHasher;

impl CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `EmptyPassword` - Plaintext is empty
    /// * `HashingFailed` - Argon2 rejected the input
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }

        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// The digest comparison is constant-time. A digest that does not parse
    /// as a PHC string is treated as a mismatch.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Run a full verification against [`DECOY_DIGEST`].
    ///
    /// Used when there is no stored digest to check, so the caller spends the
    /// same time as on a real mismatch. Always returns `false`.
    pub fn verify_decoy(&self, password: &str) -> bool {
        self.verify(password, DECOY_DIGEST)
    }
}
