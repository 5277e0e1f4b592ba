//! Visualization config value object and view settings.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::query;

/// How nodes with a given label are displayed by the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    /// Property shown as the node caption.
    pub caption: String,
    /// Property encoded as node size, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_field: Option<String>,
    /// Property used to group (color) nodes, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_field: Option<String>,
}

/// How edges with a given relationship type are displayed by the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    /// Property shown as the edge caption, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Property encoded as edge thickness, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness_field: Option<String>,
}

/// Everything the widget needs to mount: where to render, where the data
/// lives, how to style it, and what to show first.
///
/// The password is part of the value object but is never serialized; the
/// page fetches subgraphs through the server, which holds the credentials.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VizConfig {
    pub container_id: String,
    pub endpoint_url: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub node_styles: BTreeMap<String, NodeStyle>,
    pub edge_styles: BTreeMap<String, EdgeStyle>,
    pub initial_query: String,
}

/// Settings the view controller builds its config from.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    /// Id of the page element the widget renders into.
    pub container_id: String,
    /// Bolt endpoint of the graph database.
    pub endpoint_url: String,
    pub username: String,
    pub password: String,
    /// Pagerank threshold of the default view.
    pub rank_threshold: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            container_id: "viz".to_string(),
            endpoint_url: "bolt://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: "kgviz_dev_2026".to_string(),
            rank_threshold: query::DEFAULT_RANK_THRESHOLD,
        }
    }
}

impl ViewSettings {
    /// Build the widget config for these settings with the given initial
    /// query and the default label/relationship style maps.
    pub fn viz_config(&self, initial_query: String) -> VizConfig {
        VizConfig {
            container_id: self.container_id.clone(),
            endpoint_url: self.endpoint_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            node_styles: default_node_styles(),
            edge_styles: default_edge_styles(),
            initial_query,
        }
    }
}

fn default_node_styles() -> BTreeMap<String, NodeStyle> {
    let mut styles = BTreeMap::new();
    styles.insert(
        "Keyphrase".to_string(),
        NodeStyle {
            caption: "name".to_string(),
            size_field: Some("pagerank".to_string()),
            group_field: Some("community".to_string()),
        },
    );
    styles.insert(
        "Organization".to_string(),
        NodeStyle {
            caption: "name".to_string(),
            size_field: None,
            group_field: Some("community".to_string()),
        },
    );
    styles.insert(
        "Project".to_string(),
        NodeStyle {
            caption: "acronym".to_string(),
            size_field: None,
            group_field: Some("community".to_string()),
        },
    );
    styles
}

fn default_edge_styles() -> BTreeMap<String, EdgeStyle> {
    let mut styles = BTreeMap::new();
    for rel in ["includes", "participates_in", "coordinates"] {
        styles.insert(
            rel.to_string(),
            EdgeStyle {
                caption: None,
                thickness_field: None,
            },
        );
    }
    styles.insert(
        "is_similar".to_string(),
        EdgeStyle {
            caption: Some("score".to_string()),
            thickness_field: Some("score".to_string()),
        },
    );
    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_carries_default_style_maps() {
        let config = ViewSettings::default().viz_config("RETURN 1".to_string());

        assert_eq!(config.node_styles.len(), 3);
        assert_eq!(config.node_styles["Project"].caption, "acronym");
        assert_eq!(
            config.node_styles["Keyphrase"].size_field.as_deref(),
            Some("pagerank")
        );
        assert_eq!(config.edge_styles.len(), 4);
        assert_eq!(
            config.edge_styles["is_similar"].thickness_field.as_deref(),
            Some("score")
        );
        assert!(config.edge_styles["includes"].caption.is_none());
    }

    #[test]
    fn test_password_is_never_serialized() {
        let config = ViewSettings::default().viz_config("RETURN 1".to_string());
        let json = serde_json::to_value(&config).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["containerId"], "viz");
        assert_eq!(json["initialQuery"], "RETURN 1");
    }
}
