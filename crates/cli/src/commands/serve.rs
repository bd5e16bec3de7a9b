use std::sync::Arc;

use anyhow::Result;
use userbase_http::{AppState, create_router};

use crate::{build_service, connect, load_config};

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let config = load_config()?;
    let storage = connect(&config).await?;
    let user_service = Arc::new(build_service(storage));

    let state = Arc::new(AppState {
        user_service: Arc::clone(&user_service),
        request_timeout: config.request_timeout,
    });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("HTTP server stopped, closing storage");
    user_service.close().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
