/*
 * Responsibility
 * - Config読み込み → CsrfGuard 生成 (secret 不足ならここで起動失敗) → Router 組み立て
 * - Middleware の適用 (CSRF / CORS / HTTP)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::csrf::CsrfGuard;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,csrf_guard=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched.
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default behavior, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting csrf-guard in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState> {
    let guard = CsrfGuard::new(config.csrf.to_options()).inspect_err(|e| {
        tracing::error!(error = %e, "refusing to start without a valid csrf configuration");
    })?;

    tracing::info!(csrf = ?guard.config(), "csrf guard configured");

    Ok(AppState::new(Arc::new(guard)))
}

/// Routes + CSRF guard, without the transport-level layers.
pub fn build_router(state: AppState) -> Router {
    let v1 = middleware::csrf::apply(api::v1::routes(), state.clone());

    Router::new().nest("/api/v1", v1).with_state(state)
}

fn build_app(state: AppState, config: &Config) -> Router {
    let csrf_header = state.csrf.config().header_name().clone();

    let router = build_router(state);
    let router = middleware::cors::apply(router, config, &csrf_header);
    middleware::http::apply(router, config)
}
