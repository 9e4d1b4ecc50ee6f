/*
 * Responsibility
 * - 環境変数の読み込み (PORT, CSRF_*, CORS 許可, HTTP 制限値)
 * - 設定値のバリデーション (不正値なら起動失敗)
 * - CSRF secret の必須チェックは CsrfGuard::new 側 (ライブラリの契約) に任せる
 */
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::csrf::CsrfOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Raw CSRF settings as read from the environment. Validated by `CsrfGuard::new`.
#[derive(Clone, Default)]
pub struct CsrfSettings {
    pub secret: Option<String>,
    pub expires_in: Option<String>,
    pub cookie_name: Option<String>,
    pub header_name: Option<String>,
    pub http_only: Option<bool>,
    pub cookie_path: Option<String>,
}

impl std::fmt::Debug for CsrfSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the secret
        f.debug_struct("CsrfSettings")
            .field("has_secret", &self.secret.is_some())
            .field("expires_in", &self.expires_in)
            .field("cookie_name", &self.cookie_name)
            .field("header_name", &self.header_name)
            .field("http_only", &self.http_only)
            .field("cookie_path", &self.cookie_path)
            .finish()
    }
}

impl CsrfSettings {
    pub fn to_options(&self) -> CsrfOptions {
        let mut options = CsrfOptions::new();
        if let Some(secret) = &self.secret {
            options = options.with_secret(secret.clone());
        }
        if let Some(expires_in) = &self.expires_in {
            options = options.with_expires_in(expires_in.clone());
        }
        if let Some(name) = &self.cookie_name {
            options = options.with_cookie_name(name.clone());
        }
        if let Some(name) = &self.header_name {
            options = options.with_header_name(name.clone());
        }
        if let Some(http_only) = self.http_only {
            options = options.with_http_only(http_only);
        }
        if let Some(path) = &self.cookie_path {
            options = options.with_cookie_path(path.clone());
        }
        options
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub request_timeout_seconds: u64,
    pub request_body_limit_bytes: usize,

    pub csrf: CsrfSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let http_only = match std::env::var("CSRF_HTTP_ONLY").ok() {
            Some(v) => Some(parse_bool(&v).ok_or(ConfigError::Invalid("CSRF_HTTP_ONLY"))?),
            None => None,
        };

        let csrf = CsrfSettings {
            secret: std::env::var("CSRF_SECRET").ok(),
            expires_in: std::env::var("CSRF_EXPIRES_IN").ok(),
            cookie_name: std::env::var("CSRF_COOKIE_NAME").ok(),
            header_name: std::env::var("CSRF_HEADER_NAME").ok(),
            http_only,
            cookie_path: std::env::var("CSRF_COOKIE_PATH").ok(),
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            request_timeout_seconds,
            request_body_limit_bytes,
            csrf,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
