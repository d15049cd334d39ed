mod app;
mod config;
mod routes;
mod state;

use headstone_shared::Catalog;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let catalog = match Catalog::embedded() {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, "embedded stamp catalog is invalid");
            return;
        }
    };
    let dist_dir = config::dist_dir();
    if !dist_dir.is_dir() {
        tracing::warn!(dist_dir = %dist_dir.display(), "client bundle directory not found; static requests will 404");
    }
    tracing::info!(
        stamps = catalog.stamps.len(),
        dist_dir = %dist_dir.display(),
        "Serving headstone map"
    );

    let app = app::build_app(AppState::new(catalog, dist_dir));

    let addr = format!("0.0.0.0:{}", config::server_port());
    tracing::info!("Headstone map server listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind TCP listener");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
    }

    tracing::info!("Server shut down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
