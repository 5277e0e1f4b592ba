//! Broadcast-backed widget implementation.
//!
//! The actual drawing happens in the page; this side only pushes typed
//! operations to every connected WebSocket client. Sends are
//! fire-and-forget: a broadcast with no subscribers is not an error.

use kgviz_core::{VizConfig, Widget};
use tokio::sync::broadcast;

use crate::state::WidgetMessage;

/// Widget handle that forwards operations over the broadcast channel.
pub struct ChannelWidget {
    tx: broadcast::Sender<WidgetMessage>,
    config: VizConfig,
}

impl ChannelWidget {
    pub fn new(tx: broadcast::Sender<WidgetMessage>, config: VizConfig) -> Self {
        Self { tx, config }
    }

    fn send(&self, message: WidgetMessage) {
        let _ = self.tx.send(message);
    }
}

impl Widget for ChannelWidget {
    fn render(&mut self) {
        // A render of the base view always re-announces the mount, so a
        // page that subscribed late still receives the config it needs.
        self.send(WidgetMessage::Mounted {
            config: self.config.clone(),
        });
        self.send(WidgetMessage::Render);
    }

    fn render_with_query(&mut self, cypher: &str) {
        self.send(WidgetMessage::RenderQuery {
            query: cypher.to_string(),
        });
    }

    fn stabilize(&mut self) {
        self.send(WidgetMessage::Stabilize);
    }
}
