use std::sync::Arc;

use auth::Authenticator;
use auth::Clock;
use auth::TokenError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use thiserror::Error;

use super::handlers::ApiError;
use super::handlers::UNAUTHORIZED;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserDirectory;

/// Identity of the caller, attached to request extensions by the gate.
///
/// Lives for a single request. Handlers take it as an extractor; when the
/// gate did not run or did not admit the request the extractor answers 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub subject: Username,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized(UNAUTHORIZED.to_string()))
    }
}

/// Why the gate refused a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Missing or malformed bearer credential")]
    NoCredential,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("Token subject is not a registered user")]
    UnknownSubject,

    #[error("User directory failure: {0}")]
    StoreFailure(String),
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::StoreFailure(_) => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
            _ => ApiError::Unauthorized(UNAUTHORIZED.to_string()),
        }
    }
}

/// Admission decision for protected routes.
///
/// A request is admitted only when it carries a bearer token with a valid
/// signature, `now` inside the token's validity window, and a subject that
/// is still registered.
pub struct AccessGate {
    authenticator: Arc<Authenticator>,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
}

impl AccessGate {
    pub fn new(
        authenticator: Arc<Authenticator>,
        directory: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            authenticator,
            directory,
            clock,
        }
    }

    /// Decide whether a request with these headers may proceed.
    ///
    /// # Errors
    /// * `NoCredential` - No usable `Authorization: Bearer` header
    /// * `InvalidToken` - Signature, structure or validity window check failed
    /// * `UnknownSubject` - Token names a user that does not exist
    /// * `StoreFailure` - User directory could not be queried
    pub async fn admit(&self, headers: &HeaderMap) -> Result<AuthenticatedIdentity, Rejection> {
        let token = bearer_token(headers).ok_or(Rejection::NoCredential)?;

        let subject = self
            .authenticator
            .validate_token(token, self.clock.now())?;

        let subject = Username::new(subject).map_err(|_| Rejection::UnknownSubject)?;

        match self.directory.exists(&subject).await {
            Ok(true) => Ok(AuthenticatedIdentity { subject }),
            Ok(false) => Err(Rejection::UnknownSubject),
            Err(e) => Err(Rejection::StoreFailure(e.to_string())),
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Middleware that runs the access gate and adds the identity to request extensions
pub async fn authenticate(
    State(gate): State<Arc<AccessGate>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match gate.admit(req.headers()).await {
        Ok(identity) => {
            tracing::debug!(subject = %identity.subject, "Request admitted");
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(rejection) => {
            tracing::warn!(
                reason = %rejection,
                method = %req.method(),
                uri = %req.uri(),
                "Request rejected"
            );
            Err(rejection.into())
        }
    }
}
