use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::AccessToken;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::CredentialHasher;
use crate::password::PasswordError;
use crate::secret::ServerSecret;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds no mutable state; a single instance is shared by all requests.
pub struct Authenticator {
    credential_hasher: CredentialHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `InvalidLifetime` - `token_ttl` is shorter than one second
    pub fn new(secret: &ServerSecret, token_ttl: Duration) -> Result<Self, TokenError> {
        Ok(Self {
            credential_hasher: CredentialHasher::new(),
            token_codec: TokenCodec::new(secret, token_ttl)?,
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.credential_hasher.hash(password)
    }

    /// Check a password against a stored digest.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.credential_hasher.verify(password, stored_hash)
    }

    /// Spend one password verification on a login attempt with no stored
    /// digest, matching the cost of a wrong-password attempt.
    pub fn verify_unknown(&self, password: &str) {
        let _ = self.credential_hasher.verify_decoy(password);
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token issuance failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue(subject, now)?)
    }

    /// Issue a token without password verification.
    pub fn issue_token(&self, subject: &str, now: DateTime<Utc>) -> Result<AccessToken, TokenError> {
        self.token_codec.issue(subject, now)
    }

    /// Validate a token and return its subject.
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.token_codec.parse_and_validate(token, now)
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_codec.ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        let secret =
            ServerSecret::from_bytes(b"test_secret_key_at_least_32_bytes!".to_vec()).unwrap();
        Authenticator::new(&secret, Duration::hours(1)).unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let token = authenticator
            .authenticate(password, &hash, "alice", now())
            .expect("Authentication failed");

        assert!(!token.token.is_empty());
        assert_eq!(token.subject, "alice");
        assert_eq!(token.expires_at - token.issued_at, Duration::hours(1));

        let subject = authenticator
            .validate_token(&token.token, now())
            .expect("Token validation failed");
        assert_eq!(subject, "alice");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "alice", now());
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_authenticate_corrupt_stored_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("my_password", "not-a-phc-string", "alice", now());
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = authenticator();

        let token = authenticator
            .issue_token("alice", now())
            .expect("Failed to issue token");

        assert_eq!(
            authenticator.validate_token(&token.token, now()),
            Ok("alice".to_string())
        );
        assert_eq!(
            authenticator.validate_token(&token.token, now() + Duration::hours(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here", now());
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_new_rejects_zero_ttl() {
        let secret = ServerSecret::generate();
        assert!(matches!(
            Authenticator::new(&secret, Duration::zero()),
            Err(TokenError::InvalidLifetime(0))
        ));
    }
}
