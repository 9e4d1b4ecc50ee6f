//! Double-submit-cookie CSRF protection for axum, plus a small demo server.
//!
//! The protocol lives in [`csrf`] and has no knowledge of axum routing; the
//! [`middleware::csrf`] layer adapts it to a `Router`.

pub mod api;
pub mod app;
pub mod config;
pub mod csrf;
pub mod error;
pub mod middleware;
pub mod state;
