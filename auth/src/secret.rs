use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use thiserror::Error;

/// Error for server secret construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Server secret too short: minimum {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Symmetric key used to sign and verify access tokens.
///
/// Held for the lifetime of the process and never derived from request input.
/// The key bytes are never printed.
#[derive(Clone)]
pub struct ServerSecret(Vec<u8>);

impl ServerSecret {
    /// HS256 wants at least as many key bytes as the digest size.
    pub const MIN_LENGTH: usize = 32;

    /// Wrap configured key material.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 32 bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let bytes = bytes.into();
        if bytes.len() < Self::MIN_LENGTH {
            return Err(SecretError::TooShort {
                min: Self::MIN_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    /// Generate a random secret from the operating system RNG.
    ///
    /// Tokens signed with a generated secret do not survive a restart.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; Self::MIN_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ServerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServerSecret").field(&"<redacted>").finish()
    }
}
