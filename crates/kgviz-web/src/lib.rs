//! KGViz Web Server
//!
//! Axum-based web server for the visualization page, the view command
//! API, and the WebSocket channel that pushes widget operations.

pub mod routes;
pub mod state;
pub mod websocket;
pub mod widget;

use axum::{routing::get, routing::post, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // View commands
        .route("/view/init", post(routes::view::initialize))
        .route("/view/filter", post(routes::view::submit_range_filter))
        .route("/view/query", post(routes::view::submit_free_text))
        .route("/view/stabilize", post(routes::view::stabilize))
        // Subgraph data for the widget
        .route("/graph", post(routes::data::fetch_subgraph))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
