//! Server entry point.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::{config::ServerConfig, error::ServerError};

use super::{router::create_router, signal::shutdown_signal, state::AppState};

/// Bind the configured address and serve until a shutdown signal.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr.clone();
    let state = Arc::new(AppState::from_config(config)?);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    match listener.local_addr() {
        Ok(local) => tracing::info!("Listening on {}", local),
        Err(_) => tracing::info!("Listening on {}", addr),
    }

    serve(listener, state).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), ServerError> {
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;
    tracing::info!("Server stopped");
    Ok(())
}
