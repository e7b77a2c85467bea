use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequest;
use super::INVALID_CREDENTIALS;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::inbound::http::router::AppState;
use crate::user::errors::AuthError;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;
    let (username, password) = body.into_parts();

    state
        .auth_service
        .login(LoginCommand::new(username, password))
        .await
        .map_err(login_failure)
        .map(|outcome| ApiSuccess::new(StatusCode::OK, outcome.into()))
}

/// Every credential rejection answers with the same message.
fn login_failure(err: AuthError) -> ApiError {
    match err {
        AuthError::NotFound(_) | AuthError::BadPassword | AuthError::InvalidUsername(_) => {
            tracing::info!(reason = %err, "Login failed");
            ApiError::BadRequest(INVALID_CREDENTIALS.to_string())
        }
        _ => ApiError::from(err),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub username: String,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl From<LoginOutcome> for LoginResponseData {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.token.token,
            username: outcome.username.to_string(),
            message: "Login successful".to_string(),
            expires_at: outcome.token.expires_at,
        }
    }
}
