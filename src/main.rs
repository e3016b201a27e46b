//! To-do service
//!
//! HTTP front end for creating to-do items.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: connection pool size (default: `10`)
//! - `PERSIST_TIMEOUT_MS`: upper bound for a single save (default: unbounded)
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `todo_service=debug`)
//! - `LOG_FORMAT`: `pretty` (default) | `json`
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)

use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use todo_service::api::{AppState, create_router};
use todo_service::application::{AbortHandle, CreateTodoItemHandler, HandlerConfig, abort_pair};
use todo_service::infrastructure::{AppConfig, LogFormat, RepositoryFactory};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map_or_else(|_| LogFormat::default(), |config| config.log_format),
    );

    tracing::info!("Starting to-do service");

    let config = match config {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    tracing::info!(
        storage_mode = ?config.storage.mode,
        persist_timeout = ?config.persist_timeout,
        "Configuration loaded"
    );

    // Create repository for the configured backend
    let factory = RepositoryFactory::new(config.storage.clone());
    let repository = match factory.create().await {
        Ok(repository) => {
            tracing::info!("Repository initialized successfully");
            repository
        }
        Err(error) => {
            tracing::error!("Failed to initialize repository: {}", error);
            std::process::exit(1);
        }
    };

    let handler = CreateTodoItemHandler::new(repository).with_config(HandlerConfig {
        persist_timeout: config.persist_timeout,
    });
    let (abort_handle, abort_signal) = abort_pair();
    let application_state = AppState::new(handler, abort_signal);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let application = create_router(application_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let address = config.bind_address();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", address);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal(abort_handle))
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

/// Waits for SIGINT or SIGTERM, then aborts in-flight saves.
async fn shutdown_signal(abort_handle: AbortHandle) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    abort_handle.abort();
}
