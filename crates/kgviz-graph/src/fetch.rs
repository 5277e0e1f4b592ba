//! Subgraph fetching over the HTTP transactional endpoint.
//!
//! The visualization needs whole nodes and relationships back from an
//! arbitrary Cypher query. The transactional endpoint returns exactly that
//! when asked for `resultDataContents: ["graph"]`, so the fetcher POSTs
//! the query there and folds the per-row graph fragments into one
//! deduplicated payload.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::client::GraphConfig;

/// Errors surfaced by a subgraph fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("graph database request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("query rejected by the graph database ({code}): {message}")]
    QueryRejected { code: String, message: String },
}

/// A node as the widget consumes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VizNode {
    pub id: String,
    pub labels: Vec<String>,
    pub properties: Map<String, Value>,
}

/// A relationship as the widget consumes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VizEdge {
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub from: String,
    pub to: String,
    pub properties: Map<String, Value>,
}

/// Deduplicated subgraph returned to the widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VizGraph {
    pub nodes: Vec<VizNode>,
    pub edges: Vec<VizEdge>,
}

/// Executes read queries against the HTTP transactional endpoint.
#[derive(Clone)]
pub struct SubgraphFetcher {
    http: reqwest::Client,
    config: GraphConfig,
}

impl SubgraphFetcher {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Run a Cypher query and collect the subgraph it touches.
    pub async fn fetch(&self, cypher: &str) -> Result<VizGraph, FetchError> {
        let url = format!(
            "{}/db/{}/tx/commit",
            self.config.http_uri.trim_end_matches('/'),
            self.config.database
        );
        let body = serde_json::json!({
            "statements": [{
                "statement": cypher,
                "resultDataContents": ["graph"],
            }]
        });

        debug!(%url, query = %cypher, "Fetching subgraph");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let tx: TxResponse = response.json().await?;
        collect_graph(tx)
    }
}

// Wire format of the transactional endpoint, reduced to the fields the
// fetcher reads.

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    #[serde(default)]
    graph: TxGraph,
}

#[derive(Debug, Default, Deserialize)]
struct TxGraph {
    #[serde(default)]
    nodes: Vec<TxNode>,
    #[serde(default)]
    relationships: Vec<TxRelationship>,
}

#[derive(Debug, Deserialize)]
struct TxNode {
    id: String,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    properties: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct TxRelationship {
    id: String,
    #[serde(rename = "type")]
    rel_type: String,
    #[serde(rename = "startNode")]
    start_node: String,
    #[serde(rename = "endNode")]
    end_node: String,
    #[serde(default)]
    properties: Map<String, Value>,
}

/// Fold per-row graph fragments into one payload, keeping the first
/// occurrence of every node and relationship id.
fn collect_graph(tx: TxResponse) -> Result<VizGraph, FetchError> {
    if let Some(err) = tx.errors.into_iter().next() {
        return Err(FetchError::QueryRejected {
            code: err.code,
            message: err.message,
        });
    }

    let mut graph = VizGraph::default();
    let mut seen_nodes = HashSet::new();
    let mut seen_edges = HashSet::new();

    for row in tx.results.into_iter().flat_map(|r| r.data) {
        for node in row.graph.nodes {
            if seen_nodes.insert(node.id.clone()) {
                graph.nodes.push(VizNode {
                    id: node.id,
                    labels: node.labels,
                    properties: node.properties,
                });
            }
        }
        for rel in row.graph.relationships {
            if seen_edges.insert(rel.id.clone()) {
                graph.edges.push(VizEdge {
                    id: rel.id,
                    rel_type: rel.rel_type,
                    from: rel.start_node,
                    to: rel.end_node,
                    properties: rel.properties,
                });
            }
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "results": [{
            "columns": ["p", "r", "k"],
            "data": [
                {"graph": {
                    "nodes": [
                        {"id": "1", "labels": ["Project"], "properties": {"acronym": "GRAPHX"}},
                        {"id": "7", "labels": ["Keyphrase"], "properties": {"name": "graph embeddings", "pagerank": 231.4}}
                    ],
                    "relationships": [
                        {"id": "12", "type": "includes", "startNode": "1", "endNode": "7", "properties": {}}
                    ]
                }},
                {"graph": {
                    "nodes": [
                        {"id": "1", "labels": ["Project"], "properties": {"acronym": "GRAPHX"}},
                        {"id": "9", "labels": ["Keyphrase"], "properties": {"name": "ontologies"}}
                    ],
                    "relationships": [
                        {"id": "13", "type": "includes", "startNode": "1", "endNode": "9", "properties": {}},
                        {"id": "12", "type": "includes", "startNode": "1", "endNode": "7", "properties": {}}
                    ]
                }}
            ]
        }],
        "errors": []
    }"#;

    #[test]
    fn test_collect_graph_deduplicates_across_rows() {
        let tx: TxResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        let graph = collect_graph(tx).unwrap();

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.nodes[0].id, "1");
        assert_eq!(graph.nodes[0].labels, vec!["Project"]);
        assert_eq!(graph.edges[0].rel_type, "includes");
        assert_eq!(graph.edges[0].from, "1");
        assert_eq!(graph.edges[0].to, "7");
    }

    #[test]
    fn test_collect_graph_surfaces_database_errors() {
        let tx: TxResponse = serde_json::from_str(
            r#"{"results": [], "errors": [{
                "code": "Neo.ClientError.Statement.SyntaxError",
                "message": "Invalid input 'MACH'"
            }]}"#,
        )
        .unwrap();

        let err = collect_graph(tx).unwrap_err();
        match err {
            FetchError::QueryRejected { code, message } => {
                assert_eq!(code, "Neo.ClientError.Statement.SyntaxError");
                assert!(message.contains("MACH"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_edge_serializes_with_type_field() {
        let edge = VizEdge {
            id: "12".to_string(),
            rel_type: "includes".to_string(),
            from: "1".to_string(),
            to: "7".to_string(),
            properties: Map::new(),
        };
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["type"], "includes");
    }
}
