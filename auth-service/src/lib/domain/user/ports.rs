use async_trait::async_trait;

use crate::domain::user::models::Credential;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::user::errors::AuthError;

/// Port for registration and login operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with a hashed password.
    ///
    /// # Arguments
    /// * `command` - Raw username and plaintext password
    ///
    /// # Returns
    /// Stored credential record
    ///
    /// # Errors
    /// * `MissingField` - Username or password is empty
    /// * `InvalidUsername` - Username violates length limits
    /// * `UsernameTaken` - Username is already registered
    /// * `Hashing` - Password hashing failed
    /// * `StoreFailure` - User directory operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Credential, AuthError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Raw username and plaintext password
    ///
    /// # Returns
    /// Issued token for the user
    ///
    /// # Errors
    /// * `MissingField` - Username or password is empty
    /// * `NotFound` - No user with this username
    /// * `BadPassword` - Password does not match
    /// * `TokenIssue` - Token could not be issued
    /// * `StoreFailure` - User directory operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError>;

    /// Retrieve a registered user by username.
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `StoreFailure` - User directory operation failed
    async fn get_user(&self, username: &Username) -> Result<Credential, AuthError>;
}

/// Storage of credential records keyed by username.
///
/// Implementations provide their own concurrency safety; `save` must reject a
/// duplicate username atomically.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Check whether a username is registered.
    ///
    /// # Errors
    /// * `StoreFailure` - Storage operation failed
    async fn exists(&self, username: &Username) -> Result<bool, AuthError>;

    /// Retrieve a credential by username.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `StoreFailure` - Storage operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Credential>, AuthError>;

    /// Persist a new credential.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `StoreFailure` - Storage operation failed
    async fn save(&self, credential: Credential) -> Result<(), AuthError>;
}
