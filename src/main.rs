use notes_api::{build_service, config, router};

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Env and log setup
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notes_api=info,tower_http=info")),
        )
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });

    // Service creation
    let service = build_service(&cfg).await.unwrap_or_else(|e| {
        tracing::error!("Failed to establish database connection: {e}");
        panic!("failed to establish database connection: {e}");
    });

    let app = router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {}: {e}", cfg.listen_addr));

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("REST server starting, listening on {}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("failed to start server");

    tracing::info!("Server stopped");
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }

    tracing::info!("Shutdown signal received");
}
