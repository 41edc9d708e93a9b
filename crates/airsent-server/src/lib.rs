#![doc = include_str!("../../../docs/airsent-server.md")]
//! airsent-server: Axum web server for the review sentiment dashboard.

pub mod api;
pub mod page;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use airsent_core::DashboardContext;

use crate::state::AppState;

pub use page::{Section, SentimentView};
pub use state::ServerConfig;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard pages
        .route("/", get(page::index))
        .route("/review", post(page::submit_form))
        .route("/logo", get(api::logo))
        .route("/static/{*path}", get(api::serve_static))
        // API routes
        .nest("/api", api::router())
        .with_state(state)
        .layer(cors)
}

/// Load the dashboard context and start the server on the given address.
///
/// Any missing or malformed input file aborts startup.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let dashboard = config.dashboard_config()?;
    let ctx = DashboardContext::load(&dashboard)?;
    serve_context(ctx, &config).await
}

/// Start the server with an already-loaded context.
pub async fn serve_context(ctx: DashboardContext, config: &ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(ctx)?;
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Airsent dashboard at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
