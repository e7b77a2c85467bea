use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Signed payload of an access token.
///
/// Timestamps are whole Unix seconds, as in RFC 7519.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims valid from `issued_at` for `lifetime_seconds`.
    ///
    /// # Errors
    /// * `EmptySubject` - Subject is empty
    /// * `EncodingFailed` - Expiry overflows the timestamp range
    pub fn new(
        subject: impl Into<String>,
        issued_at: i64,
        lifetime_seconds: i64,
    ) -> Result<Self, TokenError> {
        let sub = subject.into();
        if sub.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let exp = issued_at
            .checked_add(lifetime_seconds)
            .ok_or_else(|| TokenError::EncodingFailed("expiry out of range".to_string()))?;

        Ok(Self {
            sub,
            iat: issued_at,
            exp,
        })
    }

    /// Check the claims are well-formed and `now` lies in `[iat, exp)`.
    ///
    /// # Errors
    /// * `Malformed` - Empty subject or `exp <= iat`
    /// * `Expired` - `now >= exp`
    /// * `NotYetValid` - `now < iat`
    pub fn check_window(&self, now: i64) -> Result<(), TokenError> {
        if self.sub.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_string()));
        }
        if self.exp <= self.iat {
            return Err(TokenError::Malformed(
                "expiry is not after issue time".to_string(),
            ));
        }
        if now >= self.exp {
            return Err(TokenError::Expired);
        }
        if now < self.iat {
            return Err(TokenError::NotYetValid);
        }
        Ok(())
    }
}

/// An issued, signed access token together with its decoded validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Compact token text handed to the client
    pub token: String,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub(crate) fn to_datetime(timestamp: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| TokenError::EncodingFailed(format!("timestamp {} out of range", timestamp)))
}
