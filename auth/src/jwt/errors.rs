use thiserror::Error;

/// Error type for token issuance and validation.
///
/// The validation variants are expected outcomes of checking client input;
/// callers decide how much of the reason to reveal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token subject must not be empty")]
    EmptySubject,

    #[error("Token lifetime must be at least one second, got {0}s")]
    InvalidLifetime(i64),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
