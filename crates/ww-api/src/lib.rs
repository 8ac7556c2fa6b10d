//! # ww-api
//!
//! The web routing and orchestration layer for Wishwall.

pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::routing::{get, post, MethodRouter};
use axum::Router;
use ww_core::traits::MessageStore;

pub use error::ApiError;
pub use handlers::AppState;

/// Path of the JSON message-store endpoint.
pub const WISHES_PATH: &str = "/api/wishes";
/// Legacy serverless-function path still used by older pages; served identically.
pub const LEGACY_WISHES_PATH: &str = "/.netlify/functions/wishes";

/// Builds the full application router (separated from `serve` for testing).
pub fn router(store: Arc<dyn MessageStore>) -> Router {
    Router::new()
        // The page: guestbook form + blessings wall
        .route("/", get(handlers::wall_page))
        .route("/guestbook", post(handlers::sign_guestbook))
        // The message store endpoint
        .route(WISHES_PATH, wishes_routes())
        .route(LEGACY_WISHES_PATH, wishes_routes())
        .route("/health", get(handlers::health))
        .layer(middleware::cors_policy())
        .layer(middleware::standard_middleware())
        .with_state(AppState { store })
}

fn wishes_routes() -> MethodRouter<AppState> {
    get(handlers::list_wishes)
        .post(handlers::create_wish)
        .options(handlers::preflight)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(store: Arc<dyn MessageStore>, addr: &str) -> anyhow::Result<()> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "wishwall listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
