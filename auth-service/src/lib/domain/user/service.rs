use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::AuthenticationError;
use auth::Clock;
use auth::PasswordError;

use crate::domain::user::models::Credential;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserDirectory;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UD>
where
    UD: UserDirectory + ?Sized,
{
    directory: Arc<UD>,
    authenticator: Arc<Authenticator>,
    clock: Arc<dyn Clock>,
}

impl<UD> AuthService<UD>
where
    UD: UserDirectory + ?Sized,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - Credential storage
    /// * `authenticator` - Password hashing and token issuance
    /// * `clock` - Time source for token issuance
    pub fn new(directory: Arc<UD>, authenticator: Arc<Authenticator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            directory,
            authenticator,
            clock,
        }
    }
}

fn required(username: String, password: &str) -> Result<Username, AuthError> {
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingField);
    }
    Ok(Username::new(username)?)
}

#[async_trait]
impl<UD> AuthServicePort for AuthService<UD>
where
    UD: UserDirectory + ?Sized,
{
    async fn register(&self, command: RegisterCommand) -> Result<Credential, AuthError> {
        let username = required(command.username, &command.password)?;

        if self.directory.exists(&username).await? {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| match e {
                PasswordError::EmptyPassword => AuthError::MissingField,
                PasswordError::HashingFailed(msg) => AuthError::Hashing(msg),
            })?;

        let credential = Credential {
            id: UserId::new(),
            username,
            password_hash,
            created_at: self.clock.now(),
        };

        // The directory re-checks uniqueness; a concurrent registration of the
        // same name loses here without touching the stored record.
        self.directory.save(credential.clone()).await?;

        tracing::info!(user_id = %credential.id, username = %credential.username, "User registered");

        Ok(credential)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        let username = required(command.username, &command.password)?;

        let Some(credential) = self.directory.find_by_username(&username).await? else {
            self.authenticator.verify_unknown(&command.password);
            return Err(AuthError::NotFound(username.to_string()));
        };

        let token = self
            .authenticator
            .authenticate(
                &command.password,
                &credential.password_hash,
                credential.username.as_str(),
                self.clock.now(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::BadPassword,
                AuthenticationError::Token(err) => AuthError::TokenIssue(err.to_string()),
            })?;

        tracing::info!(username = %credential.username, expires_at = %token.expires_at, "Token issued");

        Ok(LoginOutcome {
            username: credential.username,
            token,
        })
    }

    async fn get_user(&self, username: &Username) -> Result<Credential, AuthError> {
        self.directory
            .find_by_username(username)
            .await?
            .ok_or_else(|| AuthError::NotFound(username.to_string()))
    }
}
