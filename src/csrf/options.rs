//! Guard configuration.
//!
//! `CsrfOptions` is what callers fill in; `CsrfOptions::validate` turns it into the
//! immutable `CsrfConfig` shared by every request. Validation happens once, at setup.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;

use crate::csrf::context::RequestContext;
use crate::csrf::duration::parse_duration;
use crate::csrf::error::CsrfError;

pub const DEFAULT_EXPIRES_IN: &str = "1h";
pub const DEFAULT_COOKIE_NAME: &str = "csrf_token";
pub const DEFAULT_HEADER_NAME: &str = "x-csrf-token";
pub const DEFAULT_SAFE_METHODS: [&str; 2] = ["GET", "HEAD"];

/// Per-request skip hook.
pub type SkipFn = Arc<dyn Fn(&RequestContext) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct CsrfOptions {
    secret: Option<String>,
    expires_in: Option<String>,
    cookie_name: Option<String>,
    header_name: Option<String>,
    http_only: Option<bool>,
    cookie_path: Option<String>,
    safe_methods: Option<Vec<String>>,
    should_skip: Option<SkipFn>,
    skip_create: Option<SkipFn>,
    skip_verify: Option<SkipFn>,
}

impl fmt::Debug for CsrfOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the secret
        f.debug_struct("CsrfOptions")
            .field("has_secret", &self.secret.is_some())
            .field("expires_in", &self.expires_in)
            .field("cookie_name", &self.cookie_name)
            .field("header_name", &self.header_name)
            .field("http_only", &self.http_only)
            .field("cookie_path", &self.cookie_path)
            .field("safe_methods", &self.safe_methods)
            .field("should_skip", &self.should_skip.is_some())
            .field("skip_create", &self.skip_create.is_some())
            .field("skip_verify", &self.skip_verify.is_some())
            .finish()
    }
}

impl CsrfOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Token lifetime, e.g. `"15m"`, `"1h"`, `"3600"` (seconds).
    pub fn with_expires_in(mut self, expires_in: impl Into<String>) -> Self {
        self.expires_in = Some(expires_in.into());
        self
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = Some(name.into());
        self
    }

    pub fn with_header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = Some(name.into());
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = Some(http_only);
        self
    }

    pub fn with_cookie_path(mut self, path: impl Into<String>) -> Self {
        self.cookie_path = Some(path.into());
        self
    }

    /// Methods that receive a token but are never required to present one.
    pub fn with_safe_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.safe_methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    /// Skip both creation and verification when the hook returns true.
    pub fn with_should_skip<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestContext) -> bool + Send + Sync + 'static,
    {
        self.should_skip = Some(Arc::new(hook));
        self
    }

    pub fn with_skip_create<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestContext) -> bool + Send + Sync + 'static,
    {
        self.skip_create = Some(Arc::new(hook));
        self
    }

    pub fn with_skip_verify<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestContext) -> bool + Send + Sync + 'static,
    {
        self.skip_verify = Some(Arc::new(hook));
        self
    }

    /// Check required fields and fill in defaults.
    pub fn validate(self) -> Result<CsrfConfig, CsrfError> {
        let secret = self
            .secret
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| CsrfError::configuration("secret is required"))?;

        let expires_in_expr = self
            .expires_in
            .unwrap_or_else(|| DEFAULT_EXPIRES_IN.to_string());
        let expires_in = parse_duration(&expires_in_expr)
            .map_err(|e| CsrfError::configuration(format!("expires_in: {e}")))?;
        if expires_in < Duration::from_secs(1) {
            return Err(CsrfError::configuration(
                "expires_in must be at least one second",
            ));
        }
        // Token claims carry whole seconds only.
        if expires_in.subsec_nanos() != 0 {
            return Err(CsrfError::configuration(format!(
                "expires_in {expires_in_expr:?} is not a whole number of seconds"
            )));
        }

        let cookie_name = self
            .cookie_name
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());
        if !is_valid_cookie_name(&cookie_name) {
            return Err(CsrfError::configuration(format!(
                "cookie_name {cookie_name:?} is not a valid cookie name"
            )));
        }

        let header_name = self
            .header_name
            .unwrap_or_else(|| DEFAULT_HEADER_NAME.to_string());
        let header_name = HeaderName::from_bytes(header_name.as_bytes()).map_err(|_| {
            CsrfError::configuration(format!(
                "header_name {header_name:?} is not a valid header name"
            ))
        })?;

        let safe_methods = self
            .safe_methods
            .unwrap_or_else(|| DEFAULT_SAFE_METHODS.iter().map(|m| m.to_string()).collect())
            .into_iter()
            .map(|m| m.trim().to_ascii_uppercase())
            .filter(|m| !m.is_empty())
            .collect();

        Ok(CsrfConfig {
            secret,
            expires_in,
            cookie_name,
            header_name,
            http_only: self.http_only.unwrap_or(true),
            cookie_path: self.cookie_path.filter(|p| !p.is_empty()),
            safe_methods,
            should_skip: self.should_skip,
            skip_create: self.skip_create,
            skip_verify: self.skip_verify,
        })
    }
}

// RFC 6265 token: visible ASCII minus separators.
fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}

/// Validated, immutable guard configuration.
#[derive(Clone)]
pub struct CsrfConfig {
    secret: String,
    expires_in: Duration,
    cookie_name: String,
    header_name: HeaderName,
    http_only: bool,
    cookie_path: Option<String>,
    safe_methods: Vec<String>,
    should_skip: Option<SkipFn>,
    skip_create: Option<SkipFn>,
    skip_verify: Option<SkipFn>,
}

impl fmt::Debug for CsrfConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfConfig")
            .field("expires_in", &self.expires_in)
            .field("cookie_name", &self.cookie_name)
            .field("header_name", &self.header_name)
            .field("http_only", &self.http_only)
            .field("cookie_path", &self.cookie_path)
            .field("safe_methods", &self.safe_methods)
            .finish_non_exhaustive()
    }
}

impl CsrfConfig {
    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }

    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }

    pub fn http_only(&self) -> bool {
        self.http_only
    }

    pub fn cookie_path(&self) -> Option<&str> {
        self.cookie_path.as_deref()
    }

    pub fn is_safe_method(&self, method: &str) -> bool {
        self.safe_methods
            .iter()
            .any(|m| m.eq_ignore_ascii_case(method))
    }

    pub(crate) fn should_skip(&self, ctx: &RequestContext) -> bool {
        self.should_skip.as_ref().is_some_and(|hook| hook(ctx))
    }

    pub(crate) fn skip_create(&self, ctx: &RequestContext) -> bool {
        self.skip_create.as_ref().is_some_and(|hook| hook(ctx))
    }

    pub(crate) fn skip_verify(&self, ctx: &RequestContext) -> bool {
        self.skip_verify.as_ref().is_some_and(|hook| hook(ctx))
    }
}
