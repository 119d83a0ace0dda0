//! HTTP surface for the IQ sample buffer.
//!
//! Routes:
//! - `POST /webhook`     → append a JSON batch of samples
//! - `GET  /api/iq-data` → current buffer contents, oldest first
//!
//! Every response passes through the permissive CORS layer in [`cors`], and
//! unmatched paths fall through to an optional static directory.

pub mod cors;
pub mod error;
pub mod routes;

pub use error::ApiError;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use iq_config::{ServerConfig, DEFAULT_MAX_BODY_BYTES};
use iq_core::{Result, SharedBuffer};
use std::future::Future;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Build the application router around `buffer` with the default body limit.
pub fn router(buffer: SharedBuffer, static_dir: Option<&Path>) -> Router {
    router_with_limit(buffer, static_dir, DEFAULT_MAX_BODY_BYTES)
}

/// Build the application router; request bodies over `max_body_bytes` get `413`.
pub fn router_with_limit(
    buffer: SharedBuffer,
    static_dir: Option<&Path>,
    max_body_bytes: usize,
) -> Router {
    let mut app = Router::new()
        .route("/webhook", post(routes::ingest))
        .route("/api/iq-data", get(routes::iq_data));

    if let Some(dir) = static_dir {
        info!("Serving static files from '{}'", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    // Layered last so preflights and static responses get the headers too.
    app.with_state(buffer)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn(cors::cors))
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Bind the configured address and serve a fresh buffer until Ctrl-C.
///
/// Failing to bind is the only fatal condition.
pub async fn run(config: &ServerConfig) -> Result<()> {
    let listener = TcpListener::bind((config.bind.as_str(), config.port)).await?;
    let buffer = SharedBuffer::new(config.capacity);

    info!(
        "Starting IQ data server on {}:{} (capacity {})",
        config.bind, config.port, config.capacity
    );

    let app = router_with_limit(buffer, config.static_dir.as_deref(), config.max_body_bytes);
    serve(listener, app, shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
