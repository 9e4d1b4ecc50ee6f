use crate::csrf::context::RequestContext;
use crate::csrf::error::{Carrier, CsrfError};
use crate::csrf::options::CsrfConfig;
use crate::csrf::token::{CsrfClaims, TokenCodec};

/// Double-submit check.
///
/// Order matters for the reported reason:
/// 1. both carriers present (an empty value counts as absent)
/// 2. header token has a valid signature and is not expired
/// 3. header token == cookie token, byte for byte
pub fn verify_at(
    ctx: &RequestContext,
    config: &CsrfConfig,
    codec: &TokenCodec,
    now: i64,
) -> Result<CsrfClaims, CsrfError> {
    let header_token = ctx
        .header(config.header_name().as_str())
        .filter(|v| !v.is_empty())
        .ok_or(CsrfError::MissingToken(Carrier::Header))?;

    let cookie_token = ctx
        .cookie(config.cookie_name())
        .filter(|v| !v.is_empty())
        .ok_or(CsrfError::MissingToken(Carrier::Cookie))?;

    let claims = codec.verify_at(header_token, now)?;

    if header_token != cookie_token {
        return Err(CsrfError::TokenMismatch);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csrf::error::TokenError;
    use crate::csrf::options::CsrfOptions;

    const NOW: i64 = 1_700_000_000;

    struct Fixture {
        config: CsrfConfig,
        codec: TokenCodec,
    }

    impl Fixture {
        fn new() -> Self {
            let config = CsrfOptions::new()
                .with_secret("verifier-secret")
                .with_expires_in("10m")
                .validate()
                .unwrap();
            let codec = TokenCodec::new(config.secret(), config.expires_in());
            Self { config, codec }
        }

        fn request(&self, header: Option<&str>, cookie: Option<&str>) -> RequestContext {
            let mut ctx = RequestContext::new("POST", "/submit");
            if let Some(token) = header {
                ctx = ctx.with_header("X-CSRF-Token", token);
            }
            if let Some(token) = cookie {
                ctx = ctx.with_cookie("csrf_token", token);
            }
            ctx
        }

        fn verify(&self, ctx: &RequestContext, now: i64) -> Result<CsrfClaims, CsrfError> {
            verify_at(ctx, &self.config, &self.codec, now)
        }
    }

    #[test]
    fn matching_valid_pair_passes() {
        let fx = Fixture::new();
        let token = fx.codec.sign_at(NOW).unwrap();

        let ctx = fx.request(Some(&token), Some(&token));
        assert!(fx.verify(&ctx, NOW + 5).is_ok());
    }

    #[test]
    fn missing_carriers_are_reported() {
        let fx = Fixture::new();
        let token = fx.codec.sign_at(NOW).unwrap();

        let err = fx.verify(&fx.request(None, None), NOW).unwrap_err();
        assert!(matches!(err, CsrfError::MissingToken(Carrier::Header)));

        let err = fx.verify(&fx.request(None, Some(&token)), NOW).unwrap_err();
        assert!(matches!(err, CsrfError::MissingToken(Carrier::Header)));

        let err = fx.verify(&fx.request(Some(&token), None), NOW).unwrap_err();
        assert!(matches!(err, CsrfError::MissingToken(Carrier::Cookie)));

        let err = fx.verify(&fx.request(Some(""), Some(&token)), NOW).unwrap_err();
        assert!(matches!(err, CsrfError::MissingToken(Carrier::Header)));
    }

    #[test]
    fn expired_token_is_invalid() {
        let fx = Fixture::new();
        let token = fx.codec.sign_at(NOW).unwrap();
        let ctx = fx.request(Some(&token), Some(&token));

        assert!(fx.verify(&ctx, NOW + 599).is_ok());
        let err = fx.verify(&ctx, NOW + 600).unwrap_err();
        assert!(matches!(err, CsrfError::InvalidToken(TokenError::Expired)));
    }

    #[test]
    fn foreign_secret_is_invalid() {
        let fx = Fixture::new();
        let forged = TokenCodec::new("attacker-secret", fx.config.expires_in())
            .sign_at(NOW)
            .unwrap();

        let ctx = fx.request(Some(&forged), Some(&forged));
        let err = fx.verify(&ctx, NOW).unwrap_err();
        assert!(matches!(err, CsrfError::InvalidToken(TokenError::Jwt(_))));
    }

    #[test]
    fn equal_but_tampered_carriers_are_invalid() {
        let fx = Fixture::new();
        let mut token = fx.codec.sign_at(NOW).unwrap();
        token.insert(0, 'A');

        let ctx = fx.request(Some(&token), Some(&token));
        assert!(matches!(
            fx.verify(&ctx, NOW).unwrap_err(),
            CsrfError::InvalidToken(_)
        ));
    }

    #[test]
    fn valid_but_different_tokens_mismatch() {
        let fx = Fixture::new();
        let header = fx.codec.sign_at(NOW).unwrap();
        let cookie = fx.codec.sign_at(NOW).unwrap();

        let ctx = fx.request(Some(&header), Some(&cookie));
        assert!(matches!(
            fx.verify(&ctx, NOW).unwrap_err(),
            CsrfError::TokenMismatch
        ));
    }
}
