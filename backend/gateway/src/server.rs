//! Main HTTP server: routing, CORS, startup.

use anyhow::Result;
use axum::{
    Router,
    routing::get,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::landing;
use crate::thumbnail_api;

/// Application state shared across routes.
///
/// Holds only the pooled HTTP client; per-request data never lives here.
#[derive(Clone, Default)]
pub struct GatewayState {
    /// Client used by the video fetcher. Cloning is cheap (shared pool).
    pub http: reqwest::Client,
}

impl GatewayState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Build the Axum router with all routes and the CORS layer.
///
/// The CORS layer allows every origin, method, and header, and answers
/// `OPTIONS` preflights itself with an empty 200 before any handler runs.
pub fn build_router(state: GatewayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(landing::index))
        .route("/api/health", get(thumbnail_api::health))
        .route(
            "/api/thumbnail",
            get(thumbnail_api::usage).post(thumbnail_api::create_thumbnail),
        )
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server and serve until the process is stopped.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    info!("thumbnail HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
