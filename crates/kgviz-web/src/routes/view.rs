//! View command route handlers.
//!
//! Each endpoint is one named UI action; all of them dispatch through the
//! single view controller and return the outcome as JSON. Rejections are
//! command outcomes, not transport errors, so every response is 200 and
//! the page switches on the `status` field.

use axum::{extract::State, Json};
use serde::Deserialize;

use kgviz_core::{Dispatch, KeyPress, ViewCommand};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct RangeFilterRequest {
    pub start: String,
    pub end: String,
    /// Accepted and ignored; the form has always carried it.
    #[serde(default)]
    pub score: String,
}

#[derive(Deserialize)]
pub struct FreeTextRequest {
    pub key: KeyPress,
    pub text: String,
}

/// POST /api/view/init - construct the widget and render the default view.
pub async fn initialize(State(state): State<AppState>) -> Json<Dispatch> {
    let outcome = state.view.lock().await.dispatch(ViewCommand::InitializeView);
    Json(outcome)
}

/// POST /api/view/filter - submit the pagerank range filter.
pub async fn submit_range_filter(
    State(state): State<AppState>,
    Json(req): Json<RangeFilterRequest>,
) -> Json<Dispatch> {
    let outcome = state
        .view
        .lock()
        .await
        .dispatch(ViewCommand::SubmitRangeFilter {
            start: req.start,
            end: req.end,
            score: req.score,
        });
    Json(outcome)
}

/// POST /api/view/query - submit the free-text query field.
pub async fn submit_free_text(
    State(state): State<AppState>,
    Json(req): Json<FreeTextRequest>,
) -> Json<Dispatch> {
    let outcome = state
        .view
        .lock()
        .await
        .dispatch(ViewCommand::SubmitFreeText {
            key: req.key,
            text: req.text,
        });
    Json(outcome)
}

/// POST /api/view/stabilize - let the layout settle.
pub async fn stabilize(State(state): State<AppState>) -> Json<Dispatch> {
    let outcome = state.view.lock().await.dispatch(ViewCommand::Stabilize);
    Json(outcome)
}
