//! Visualization page route handler.
//!
//! Serves the embedded page that hosts the widget and its controls.

use axum::response::{Html, IntoResponse};

const VIZ_HTML: &str = include_str!("../../../../assets/web/viz.html");

/// GET / - Serve the visualization page.
pub async fn index() -> impl IntoResponse {
    Html(VIZ_HTML)
}
