use axum::http::header::{HeaderMap, HeaderName, HeaderValue, SET_COOKIE};
use axum_extra::extract::cookie::Cookie;

use crate::csrf::error::CsrfError;
use crate::csrf::options::CsrfConfig;
use crate::csrf::token::TokenCodec;

/// A freshly issued token and the two response values that carry it.
///
/// The cookie and the header always hold the same token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    token: String,
    set_cookie: HeaderValue,
    header_name: HeaderName,
    header_value: HeaderValue,
}

impl IssuedToken {
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Set-Cookie` response header.
    pub fn set_cookie(&self) -> &HeaderValue {
        &self.set_cookie
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.header_value
    }

    /// Attach both carriers to the outgoing response headers.
    pub fn write_to(&self, headers: &mut HeaderMap) {
        headers.append(SET_COOKIE, self.set_cookie.clone());
        headers.insert(self.header_name.clone(), self.header_value.clone());
    }
}

pub fn issue_at(
    config: &CsrfConfig,
    codec: &TokenCodec,
    now: i64,
) -> Result<IssuedToken, CsrfError> {
    let token = codec.sign_at(now)?;

    let mut cookie = Cookie::new(config.cookie_name().to_string(), token.clone());
    cookie.set_http_only(config.http_only());
    if let Some(path) = config.cookie_path() {
        cookie.set_path(path.to_string());
    }

    let set_cookie = HeaderValue::from_str(&cookie.to_string())?;
    let header_value = HeaderValue::from_str(&token)?;

    Ok(IssuedToken {
        token,
        set_cookie,
        header_name: config.header_name().clone(),
        header_value,
    })
}
