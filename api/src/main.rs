//! Report Card API Server

mod config;
mod error;
mod handlers;
mod routes;
mod state;


use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use report_card_core::adapter::{PostgresReportRepository, ReportRepository};
use report_card_core::backend::BackendClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before tracing so RUST_LOG from the file applies
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,report_card_api=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::AppConfig::from_env()?;

    info!("Starting Report Card API Server");
    info!("Listening on {}:{}", config.host, config.port);

    let repository =
        PostgresReportRepository::connect(config.connect_options(), config.db_max_connections)
            .await?;
    repository.ensure_schema().await?;

    let backend = match config.supabase_credentials() {
        Some((url, key)) => Some(BackendClient::new(url, key)?),
        None => {
            warn!("SUPABASE_URL or SUPABASE_KEY not set, backend client disabled");
            None
        }
    };

    // Create application state
    let state = state::AppState::new(Arc::new(repository.clone()), backend, &config);

    // Build router
    let app = routes::create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repository.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install signal handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
