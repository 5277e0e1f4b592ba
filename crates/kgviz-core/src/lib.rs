//! # KGViz Core
//!
//! Domain logic for the knowledge-graph visualization front end:
//! parameterized query building, the visualization config value object,
//! and the view command layer that drives the single widget instance.
//!
//! This crate performs no I/O. The widget is a trait; the web crate
//! supplies the WebSocket-backed implementation and tests use a recorder.

pub mod error;
pub mod query;
pub mod view;
pub mod viz;

pub use error::QueryError;
pub use view::{Dispatch, KeyPress, ViewCommand, ViewController, Widget};
pub use viz::{EdgeStyle, NodeStyle, ViewSettings, VizConfig};
