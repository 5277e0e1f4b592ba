//! View command layer.
//!
//! Each UI action is a named command dispatched through
//! [`ViewController::dispatch`]. The controller owns the single optional
//! widget handle; construction happens once, on the first
//! [`ViewCommand::InitializeView`], and every later command acts on that
//! same instance.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::QueryError;
use crate::query;
use crate::viz::{ViewSettings, VizConfig};

/// Contract of the visualization widget.
///
/// All operations are fire-and-forget: the widget fetches and renders on
/// its own, and failures on that side are its responsibility.
pub trait Widget {
    /// Render the widget with its initial query.
    fn render(&mut self);
    /// Re-render with the given query.
    fn render_with_query(&mut self, cypher: &str);
    /// Let the physics-based layout settle.
    fn stabilize(&mut self);
}

/// A key press forwarded from the free-text field.
///
/// Only Enter submits; every other key deserializes to `Other` and is a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum KeyPress {
    Enter,
    #[serde(other)]
    Other,
}

/// The four UI actions, as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    /// Page ready: construct the widget and render the default view.
    InitializeView,
    /// Range-filter form submitted. `score` is read but unused.
    SubmitRangeFilter {
        start: String,
        end: String,
        score: String,
    },
    /// Key press in the free-text query field.
    SubmitFreeText { key: KeyPress, text: String },
    /// Stabilize button clicked.
    Stabilize,
}

/// Outcome of a dispatched command.
///
/// `echo` carries the normalized free-text the page writes back into the
/// input field, whether the submission rendered or was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Dispatch {
    /// The widget was constructed and rendered with this initial query.
    Initialized { query: String },
    /// The existing widget was told to render this query.
    Rendered {
        query: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        echo: Option<String>,
    },
    /// Input validation failed; `message` is the blocking alert text.
    Rejected {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        echo: Option<String>,
    },
    /// Layout stabilization was requested.
    Stabilized,
    /// The command required no action (non-Enter key press).
    Ignored,
}

/// Application state for the view: the settings and the single optional
/// widget handle.
pub struct ViewController<W> {
    settings: ViewSettings,
    make_widget: Box<dyn Fn(VizConfig) -> W + Send + Sync>,
    widget: Option<W>,
}

impl<W: Widget> ViewController<W> {
    pub fn new(
        settings: ViewSettings,
        make_widget: impl Fn(VizConfig) -> W + Send + Sync + 'static,
    ) -> Self {
        Self {
            settings,
            make_widget: Box::new(make_widget),
            widget: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.widget.is_some()
    }

    /// Route a command to its handler.
    pub fn dispatch(&mut self, command: ViewCommand) -> Dispatch {
        match command {
            ViewCommand::InitializeView => self.initialize(),
            ViewCommand::SubmitRangeFilter {
                start,
                end,
                score: _,
            } => self.submit_range_filter(&start, &end),
            ViewCommand::SubmitFreeText { key, text } => self.submit_free_text(key, &text),
            ViewCommand::Stabilize => self.stabilize(),
        }
    }

    fn initialize(&mut self) -> Dispatch {
        let initial_query = query::rank_above(self.settings.rank_threshold);

        if let Some(widget) = self.widget.as_mut() {
            // A page reconnected; re-render the existing instance instead
            // of constructing a second one.
            debug!("view already initialized, re-rendering");
            widget.render();
            return Dispatch::Rendered {
                query: initial_query,
                echo: None,
            };
        }

        let config = self.settings.viz_config(initial_query.clone());
        let mut widget = (self.make_widget)(config);
        widget.render();
        self.widget = Some(widget);

        Dispatch::Initialized {
            query: initial_query,
        }
    }

    fn submit_range_filter(&mut self, start: &str, end: &str) -> Dispatch {
        let Some(widget) = self.widget.as_mut() else {
            return Self::not_initialized();
        };

        match query::rank_between(start, end) {
            Ok(cypher) => {
                widget.render_with_query(&cypher);
                Dispatch::Rendered {
                    query: cypher,
                    echo: None,
                }
            }
            Err(err) => Dispatch::Rejected {
                message: err.to_string(),
                echo: None,
            },
        }
    }

    fn submit_free_text(&mut self, key: KeyPress, text: &str) -> Dispatch {
        if key != KeyPress::Enter {
            return Dispatch::Ignored;
        }

        let Some(widget) = self.widget.as_mut() else {
            return Self::not_initialized();
        };

        // The field must never visually retain line breaks, so the
        // stripped text is echoed back even when the submission fails.
        let stripped = query::strip_line_breaks(text);
        if stripped.is_empty() {
            return Dispatch::Rejected {
                message: QueryError::EmptyQuery.to_string(),
                echo: Some(stripped),
            };
        }

        widget.render_with_query(&stripped);
        Dispatch::Rendered {
            query: stripped.clone(),
            echo: Some(stripped),
        }
    }

    fn stabilize(&mut self) -> Dispatch {
        let Some(widget) = self.widget.as_mut() else {
            return Self::not_initialized();
        };

        widget.stabilize();
        Dispatch::Stabilized
    }

    fn not_initialized() -> Dispatch {
        Dispatch::Rejected {
            message: "The view has not been initialized yet".to_string(),
            echo: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const DEFAULT_QUERY: &str = "MATCH (p:Project)-[r:includes]-(k:Keyphrase) \
                                 WHERE k.pagerank > 200 RETURN p,r,k LIMIT 1000";

    /// Shared call log, so tests can inspect widget calls after handing
    /// the widget to the controller.
    #[derive(Clone, Default)]
    struct CallLog(Arc<Mutex<Vec<String>>>);

    impl CallLog {
        fn push(&self, entry: impl Into<String>) {
            self.0.lock().unwrap().push(entry.into());
        }

        fn calls(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct RecordingWidget {
        log: CallLog,
    }

    impl Widget for RecordingWidget {
        fn render(&mut self) {
            self.log.push("render");
        }

        fn render_with_query(&mut self, cypher: &str) {
            self.log.push(format!("render_with_query:{cypher}"));
        }

        fn stabilize(&mut self) {
            self.log.push("stabilize");
        }
    }

    fn controller(log: &CallLog) -> ViewController<RecordingWidget> {
        let log = log.clone();
        ViewController::new(ViewSettings::default(), move |_config| {
            log.push("construct");
            RecordingWidget { log: log.clone() }
        })
    }

    fn initialized_controller(log: &CallLog) -> ViewController<RecordingWidget> {
        let mut view = controller(log);
        view.dispatch(ViewCommand::InitializeView);
        view
    }

    #[test]
    fn test_initialize_constructs_once_and_renders_default() {
        let log = CallLog::default();
        let mut view = controller(&log);

        let outcome = view.dispatch(ViewCommand::InitializeView);

        assert_eq!(
            outcome,
            Dispatch::Initialized {
                query: DEFAULT_QUERY.to_string()
            }
        );
        assert_eq!(log.calls(), vec!["construct", "render"]);
    }

    #[test]
    fn test_second_initialize_keeps_single_instance() {
        let log = CallLog::default();
        let mut view = initialized_controller(&log);

        let outcome = view.dispatch(ViewCommand::InitializeView);

        assert_eq!(
            outcome,
            Dispatch::Rendered {
                query: DEFAULT_QUERY.to_string(),
                echo: None
            }
        );
        // One construction, two renders.
        assert_eq!(log.calls(), vec!["construct", "render", "render"]);
    }

    #[test]
    fn test_range_filter_renders_windowed_query() {
        let log = CallLog::default();
        let mut view = initialized_controller(&log);

        let outcome = view.dispatch(ViewCommand::SubmitRangeFilter {
            start: "100".to_string(),
            end: "300".to_string(),
            score: String::new(),
        });

        let expected = "MATCH (p:Project)-[r:includes]-(k:Keyphrase) \
                        WHERE k.pagerank > 100 AND k.pagerank < 300 RETURN p,r,k LIMIT 1000";
        assert_eq!(
            outcome,
            Dispatch::Rendered {
                query: expected.to_string(),
                echo: None
            }
        );
        assert_eq!(
            log.calls().last().unwrap(),
            &format!("render_with_query:{expected}")
        );
    }

    #[test]
    fn test_range_filter_with_empty_bound_blocks_and_skips_render() {
        let log = CallLog::default();
        let mut view = initialized_controller(&log);

        let outcome = view.dispatch(ViewCommand::SubmitRangeFilter {
            start: String::new(),
            end: "300".to_string(),
            score: String::new(),
        });

        assert!(matches!(outcome, Dispatch::Rejected { .. }));
        assert_eq!(log.calls(), vec!["construct", "render"]);
    }

    #[test]
    fn test_range_filter_rejects_non_numeric_bounds() {
        let log = CallLog::default();
        let mut view = initialized_controller(&log);

        let outcome = view.dispatch(ViewCommand::SubmitRangeFilter {
            start: "100 OR 1=1".to_string(),
            end: "300".to_string(),
            score: String::new(),
        });

        assert!(matches!(outcome, Dispatch::Rejected { .. }));
        assert_eq!(log.calls(), vec!["construct", "render"]);
    }

    #[test]
    fn test_free_text_enter_strips_breaks_and_renders_verbatim() {
        let log = CallLog::default();
        let mut view = initialized_controller(&log);

        let outcome = view.dispatch(ViewCommand::SubmitFreeText {
            key: KeyPress::Enter,
            text: "MATCH (n) RETURN n\n LIMIT 5\r\n".to_string(),
        });

        assert_eq!(
            outcome,
            Dispatch::Rendered {
                query: "MATCH (n) RETURN n LIMIT 5".to_string(),
                echo: Some("MATCH (n) RETURN n LIMIT 5".to_string()),
            }
        );
        assert_eq!(
            log.calls().last().unwrap(),
            "render_with_query:MATCH (n) RETURN n LIMIT 5"
        );
    }

    #[test]
    fn test_free_text_empty_after_stripping_blocks() {
        let log = CallLog::default();
        let mut view = initialized_controller(&log);

        let outcome = view.dispatch(ViewCommand::SubmitFreeText {
            key: KeyPress::Enter,
            text: "\n".to_string(),
        });

        assert_eq!(
            outcome,
            Dispatch::Rejected {
                message: "Please supply a query".to_string(),
                echo: Some(String::new()),
            }
        );
        assert_eq!(log.calls(), vec!["construct", "render"]);
    }

    #[test]
    fn test_non_enter_key_is_a_no_op() {
        let log = CallLog::default();
        let mut view = initialized_controller(&log);

        let outcome = view.dispatch(ViewCommand::SubmitFreeText {
            key: KeyPress::Other,
            text: "MATCH (n) RETURN n".to_string(),
        });

        assert_eq!(outcome, Dispatch::Ignored);
        assert_eq!(log.calls(), vec!["construct", "render"]);
    }

    #[test]
    fn test_stabilize_delegates_to_widget() {
        let log = CallLog::default();
        let mut view = initialized_controller(&log);

        let outcome = view.dispatch(ViewCommand::Stabilize);

        assert_eq!(outcome, Dispatch::Stabilized);
        assert_eq!(log.calls().last().unwrap(), "stabilize");
    }

    #[test]
    fn test_commands_before_initialize_are_rejected() {
        let log = CallLog::default();
        let mut view = controller(&log);

        for command in [
            ViewCommand::SubmitRangeFilter {
                start: "100".to_string(),
                end: "300".to_string(),
                score: String::new(),
            },
            ViewCommand::SubmitFreeText {
                key: KeyPress::Enter,
                text: "MATCH (n) RETURN n".to_string(),
            },
            ViewCommand::Stabilize,
        ] {
            assert!(matches!(view.dispatch(command), Dispatch::Rejected { .. }));
        }
        assert!(log.calls().is_empty());
        assert!(!view.is_initialized());
    }

    #[test]
    fn test_key_press_deserializes_unknown_keys_to_other() {
        assert_eq!(
            serde_json::from_str::<KeyPress>("\"Enter\"").unwrap(),
            KeyPress::Enter
        );
        assert_eq!(
            serde_json::from_str::<KeyPress>("\"Escape\"").unwrap(),
            KeyPress::Other
        );
    }
}
