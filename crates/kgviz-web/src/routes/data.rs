//! Subgraph data route handler.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use kgviz_graph::{FetchError, VizGraph};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubgraphRequest {
    pub query: String,
}

/// POST /api/graph - run a Cypher query and return the subgraph it
/// touches, in the shape the widget consumes.
pub async fn fetch_subgraph(
    State(state): State<AppState>,
    Json(req): Json<SubgraphRequest>,
) -> Result<Json<VizGraph>, (StatusCode, String)> {
    if req.query.trim().is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, "Empty query".to_string()));
    }

    let graph = state.fetcher.fetch(&req.query).await.map_err(|e| match e {
        FetchError::QueryRejected { .. } => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        FetchError::Transport(_) => (StatusCode::BAD_GATEWAY, e.to_string()),
    })?;

    Ok(Json(graph))
}
