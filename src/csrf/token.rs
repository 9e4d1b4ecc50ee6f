use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::csrf::error::{CsrfError, TokenError};

/// Subject claim carried by every CSRF token. There is no user identity at this layer.
pub const TOKEN_SUBJECT: &str = "csrf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrfClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// HS256 signer/verifier for CSRF tokens.
///
/// - Key material is intentionally not printable via Debug.
/// - `exp` is compared against an explicit `now`, not the library clock.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.sub = Some(TOKEN_SUBJECT.to_string());

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    pub fn sign_at(&self, now: i64) -> Result<String, CsrfError> {
        let claims = CsrfClaims {
            sub: TOKEN_SUBJECT.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
            jti: Uuid::new_v4().to_string(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                error!(error = %e, "failed to sign csrf token");
                CsrfError::Signing(e)
            },
        )
    }

    /// Check signature and claims, then expiry: a token is dead from second `exp` on.
    ///
    /// `now` is truncated to whole seconds, so `now == exp` may already be past the lifetime.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<CsrfClaims, TokenError> {
        let data = jsonwebtoken::decode::<CsrfClaims>(token, &self.decoding_key, &self.validation)?;

        if now >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(secret, Duration::from_secs(600))
    }

    #[test]
    fn signed_token_verifies_until_expiry() {
        let codec = codec("token-secret");
        let token = codec.sign_at(NOW).unwrap();

        let claims = codec.verify_at(&token, NOW).unwrap();
        assert_eq!(claims.sub, TOKEN_SUBJECT);
        assert_eq!(claims.iat, NOW);
        assert_eq!(claims.exp, NOW + 600);

        assert!(codec.verify_at(&token, NOW + 599).is_ok());
        assert!(matches!(
            codec.verify_at(&token, NOW + 600),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn token_is_rejected_once_lifetime_has_elapsed() {
        let codec = TokenCodec::new("s", Duration::from_secs(10));
        let token = codec.sign_at(1_000).unwrap();

        assert!(codec.verify_at(&token, 1_009).is_ok());
        assert!(matches!(
            codec.verify_at(&token, 1_010),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = codec("secret-a").sign_at(NOW).unwrap();
        assert!(matches!(
            codec("secret-b").verify_at(&token, NOW),
            Err(TokenError::Jwt(_))
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let codec = codec("token-secret");
        let token = codec.sign_at(NOW).unwrap();

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(codec.verify_at(&tampered, NOW).is_err());
        assert!(codec.verify_at("not-a-token", NOW).is_err());
    }

    #[test]
    fn consecutive_tokens_differ() {
        let codec = codec("token-secret");
        assert_ne!(codec.sign_at(NOW).unwrap(), codec.sign_at(NOW).unwrap());
    }
}
