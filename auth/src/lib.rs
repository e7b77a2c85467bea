//! Stateless credential and token primitives
//!
//! Provides the building blocks for token-based authentication:
//! - Password hashing (Argon2id)
//! - Signed access tokens with explicit-clock expiry checks (HS256 JWS)
//! - Server secret handling
//! - Authentication coordination
//!
//! Nothing in this crate performs I/O or keeps per-request state; the service
//! layer supplies user lookup and the current time.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::CredentialHasher;
//!
//! let hasher = CredentialHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{ServerSecret, TokenCodec, TokenError};
//! use chrono::{Duration, Utc};
//!
//! let secret = ServerSecret::from_bytes(b"secret_key_at_least_32_bytes_long!".to_vec()).unwrap();
//! let codec = TokenCodec::new(&secret, Duration::hours(1)).unwrap();
//!
//! let now = Utc::now();
//! let token = codec.issue("alice", now).unwrap();
//! assert_eq!(codec.parse_and_validate(&token.token, now).unwrap(), "alice");
//! assert_eq!(
//!     codec.parse_and_validate(&token.token, now + Duration::hours(2)),
//!     Err(TokenError::Expired)
//! );
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, ServerSecret};
//! use chrono::{Duration, Utc};
//!
//! let auth = Authenticator::new(&ServerSecret::generate(), Duration::hours(1)).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let token = auth.authenticate("password123", &hash, "alice", Utc::now()).unwrap();
//!
//! // Validate token
//! let subject = auth.validate_token(&token.token, Utc::now()).unwrap();
//! assert_eq!(subject, "alice");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::AccessToken;
pub use jwt::TokenClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::CredentialHasher;
pub use password::PasswordError;
pub use secret::SecretError;
pub use secret::ServerSecret;
