//! AuthHub server: authentication, sessions, and authorization.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use authhub_core::config::AppConfig;
use authhub_core::error::AppError;
use authhub_entity::user::UserDirectory;

#[tokio::main]
async fn main() {
    let env = std::env::var("AUTHHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AuthHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Connect the key-value store ──────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing key-value store");
    let cache = Arc::new(authhub_cache::CacheManager::new(&config.cache).await?);

    // ── Step 2: User directory ───────────────────────────────────
    // The relational backend lives behind the UserDirectory trait; this
    // build ships the in-memory implementation.
    let directory: Arc<dyn UserDirectory> = authhub_directory::MemoryDirectory::shared();

    // ── Step 3: Auth components and shared state ─────────────────
    tracing::info!("Initializing authentication components");
    let state = authhub_api::AppState::assemble(config.clone(), cache, directory)?;

    // ── Step 4: HTTP server ──────────────────────────────────────
    let app = authhub_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AuthHub server listening on {addr}");

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("AuthHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
