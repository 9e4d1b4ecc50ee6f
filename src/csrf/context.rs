use std::collections::HashMap;

use axum::extract::OriginalUri;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum_extra::extract::cookie::Cookie;

/// Read-only view of an incoming request, as seen by the guard and the skip hooks.
///
/// - Header names are stored lower-cased; lookups are case-insensitive.
/// - Only the first value of a repeated header is kept.
/// - Header values that are not visible ASCII are dropped.
/// - For a repeated cookie name the first occurrence wins. Browsers send the
///   most specific `Path` first, so a stale path-less cookie cannot shadow it.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    cookies: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| value.into());
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Build the context from axum request parts.
    ///
    /// Nested routers see a stripped URI, so the path comes from `OriginalUri` when present.
    pub fn from_parts(parts: &Parts) -> Self {
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|OriginalUri(uri)| uri.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let mut ctx = Self::new(parts.method.as_str(), path);

        for (name, value) in parts.headers.iter() {
            if let Ok(value) = value.to_str() {
                ctx = ctx.with_header(name.as_str(), value);
            }
        }

        for value in parts.headers.get_all(COOKIE) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            for cookie in Cookie::split_parse(value).flatten() {
                ctx.cookies
                    .entry(cookie.name().to_string())
                    .or_insert_with(|| cookie.value().to_string());
            }
        }

        ctx
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn method_is(&self, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }
}
