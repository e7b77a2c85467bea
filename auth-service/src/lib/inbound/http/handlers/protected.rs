use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn protected(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
) -> ApiSuccess<ProtectedResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        ProtectedResponseData {
            message: "This is a protected endpoint".to_string(),
            user: identity.subject.to_string(),
            timestamp: state.clock.now().timestamp_millis(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedResponseData {
    pub message: String,
    pub user: String,
    /// Unix milliseconds
    pub timestamp: i64,
}
