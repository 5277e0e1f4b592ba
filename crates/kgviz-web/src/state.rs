//! Application state.

use std::sync::Arc;

use kgviz_core::{ViewController, ViewSettings, VizConfig};
use kgviz_graph::{GraphConfig, SubgraphFetcher};
use serde::Serialize;
use tokio::sync::{broadcast, Mutex};

use crate::widget::ChannelWidget;

/// Widget operations pushed to connected pages.
#[derive(Clone, Serialize, Debug)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum WidgetMessage {
    /// The widget instance exists; carries everything the page needs to
    /// mount it.
    Mounted { config: VizConfig },
    /// Draw the initial query.
    Render,
    /// Draw the given query.
    RenderQuery { query: String },
    /// Let the layout settle.
    Stabilize,
}

/// Application state shared across handlers.
///
/// The controller is the process-wide owner of the single widget
/// instance; every command endpoint dispatches through it.
#[derive(Clone)]
pub struct AppState {
    pub view: Arc<Mutex<ViewController<ChannelWidget>>>,
    pub tx: broadcast::Sender<WidgetMessage>,
    pub fetcher: SubgraphFetcher,
}

impl AppState {
    pub fn new(settings: ViewSettings, graph: GraphConfig) -> Self {
        let (tx, _rx) = broadcast::channel(100);

        let widget_tx = tx.clone();
        let view = ViewController::new(settings, move |config| {
            ChannelWidget::new(widget_tx.clone(), config)
        });

        Self {
            view: Arc::new(Mutex::new(view)),
            tx,
            fetcher: SubgraphFetcher::new(graph),
        }
    }
}
