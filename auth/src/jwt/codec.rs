use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::to_datetime;
use super::claims::AccessToken;
use super::claims::TokenClaims;
use super::errors::TokenError;
use crate::secret::ServerSecret;

/// Issues and validates signed access tokens.
///
/// Tokens are compact HS256 JWS strings (`header.payload.signature`, URL-safe
/// base64) carrying `sub`, `iat` and `exp`. Validation depends only on the
/// token text, the caller-supplied `now`, and the server secret; the time
/// checks are done here rather than by the JWT library so no system clock is
/// consulted.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec signing with `secret` and issuing tokens valid for `ttl`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` is shorter than one second
    pub fn new(secret: &ServerSecret, ttl: Duration) -> Result<Self, TokenError> {
        if ttl.num_seconds() < 1 {
            return Err(TokenError::InvalidLifetime(ttl.num_seconds()));
        }

        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            validation,
            ttl,
        })
    }

    /// Lifetime of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from `now` for the configured TTL.
    ///
    /// `now` is truncated to whole seconds.
    ///
    /// # Errors
    /// * `EmptySubject` - Subject is empty
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<AccessToken, TokenError> {
        let claims = TokenClaims::new(subject, now.timestamp(), self.ttl.num_seconds())?;

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(AccessToken {
            token,
            issued_at: to_datetime(claims.iat)?,
            expires_at: to_datetime(claims.exp)?,
            subject: claims.sub,
        })
    }

    /// Verify a token and return its subject.
    ///
    /// The signature is checked first (HMAC verification is constant-time);
    /// the validity window is only inspected for authentic tokens.
    ///
    /// # Errors
    /// * `BadSignature` - Signature does not match the payload
    /// * `Malformed` - Not a decodable HS256 token, or its claims are inconsistent
    /// * `Expired` - `now` is at or past the expiry
    /// * `NotYetValid` - `now` is before the issue time
    pub fn parse_and_validate(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed(e.to_string()),
            })?
            .claims;

        claims.check_window(now.timestamp())?;

        Ok(claims.sub)
    }
}
