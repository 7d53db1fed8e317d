//! Quote Wizard - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run against PostgreSQL with default configuration
//! cargo run --bin quote-wizard-api
//!
//! # Run with in-memory sample data
//! APP_STORAGE=memory APP_PORT=3000 cargo run --bin quote-wizard-api
//! ```
//!
//! # Environment Variables
//!
//! * `APP_HOST` - Server host (default: 0.0.0.0)
//! * `APP_PORT` - Server port (default: 8080)
//! * `APP_DATABASE_URL` - PostgreSQL connection string
//! * `APP_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `APP_STORAGE` - `postgres` or `memory` (default: postgres)
//! * `APP_TIMEZONE` - IANA timezone for the age check (default: Asia/Tokyo)
//! * `APP_LOCALE` - Validation message locale, `ja-JP` or `en-US`
//! * `APP_NOTIFY_ON_ORDER` - Send receipt mail after an order (default: false)
//! * `APP_MAIL_FROM` - Sender address of receipt mail

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::SystemClock;
use infra_db::{create_pool, run_migrations, DatabaseConfig};
use interface_api::config::{ApiConfig, StorageBackend};
use interface_api::{create_router, AppState, Backends};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid APP_* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        "Starting quote wizard API server"
    );

    let backends = match config.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory sample data");
            Backends::in_memory()
        }
        StorageBackend::Postgres => {
            let pool = create_pool(DatabaseConfig::new(config.database_url.clone()))
                .await
                .context("database connection failed")?;
            run_migrations(&pool).await.context("migrations failed")?;
            Backends::postgres(pool)
        }
    };

    let clock = Arc::new(SystemClock::new(config.timezone()?));
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    let state = AppState::new(backends, clock, config)?;
    let app = create_router(state);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over `log_level`
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
