//! HTTP server initialization and runtime setup.
//!
//! Handles word list loading, store connection, service wiring, and the Axum
//! server lifecycle.

use crate::application::services::{AuthService, CodeGenerator, LinkService, RateLimiter};
use crate::config::{Config, mask_connection_string};
use crate::infrastructure::store::{self, StoreHandles};
use crate::infrastructure::wordlist::load_corpora;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Word corpora from `WORD_FILES`
/// - Store connection (with retries)
/// - Link, rate limit and auth services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - A word file is unreadable or empty
/// - The store stays unreachable after all retries
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let stores = connect_store(&config).await?;
    let state = build_state(&config, stores).await?;

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

/// Opens the configured store, retrying with exponential backoff.
///
/// # Errors
///
/// Returns the last connection error once `store_connect_retries` retries
/// are exhausted.
pub async fn connect_store(config: &Config) -> Result<StoreHandles> {
    let strategy = ExponentialBackoff::from_millis(10)
        .factor(20)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(config.store_connect_retries);

    let url = config.redis_url.as_str();
    let handles = Retry::spawn(strategy, || async move {
        store::open(url).await.inspect_err(|e| {
            warn!("Store connection to {} failed: {}", mask_connection_string(url), e);
        })
    })
    .await
    .with_context(|| {
        format!(
            "Store unreachable at {} after {} retries",
            mask_connection_string(url),
            config.store_connect_retries
        )
    })?;

    info!("Connected to store");
    Ok(handles)
}

/// Loads the word corpora and wires services around `stores`.
///
/// # Errors
///
/// Returns an error if a word file is unreadable or empty.
pub async fn build_state(config: &Config, stores: StoreHandles) -> Result<AppState> {
    let corpora = load_corpora(&config.word_files)
        .await
        .context("Failed to load word lists")?;

    let generator = CodeGenerator::new(corpora, stores.links.clone())?
        .with_max_attempts(config.code_max_attempts);
    info!("Code space: {} word combinations", generator.code_space());

    let link_service = LinkService::new(stores.links.clone(), generator, &config.base_url);

    let rate_limiter = RateLimiter::new(
        stores.counters,
        config.rate_limit_window(),
        config.rate_limit_max_requests,
    );

    let auth_service = AuthService::new(config.link_password.clone());
    if !auth_service.is_enabled() {
        warn!("LINK_PASSWORD is not set; /customshorten accepts any caller");
    }

    Ok(AppState {
        link_service: Arc::new(link_service),
        rate_limiter: Arc::new(rate_limiter),
        auth_service: Arc::new(auth_service),
        store: stores.links,
        behind_proxy: config.behind_proxy,
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
