use std::fmt;

use axum::http::header::InvalidHeaderValue;
use thiserror::Error;

/// Where a CSRF token travels between client and server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Carrier {
    Header,
    Cookie,
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Carrier::Header => write!(f, "header"),
            Carrier::Cookie => write!(f, "cookie"),
        }
    }
}

/// Failures of a single token check (signature, claims, expiry).
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Error)]
pub enum CsrfError {
    /// Setup-time only. The guard is never built from an invalid configuration.
    #[error("invalid csrf configuration: {0}")]
    Configuration(String),

    #[error("missing csrf token in {0}")]
    MissingToken(Carrier),

    #[error("invalid csrf token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("csrf token in header does not match cookie")]
    TokenMismatch,

    #[error("failed to sign csrf token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("issued csrf token is not a valid header value")]
    HeaderEncoding(#[from] InvalidHeaderValue),
}

impl CsrfError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// True for the per-request outcomes of comparing/validating client tokens.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingToken(_) | Self::InvalidToken(_) | Self::TokenMismatch
        )
    }
}
