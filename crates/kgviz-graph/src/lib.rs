//! # KGViz Graph
//!
//! Neo4j plumbing for KGViz.
//!
//! Provides the Bolt connection client, schema initialization, CSV
//! ingestion into the knowledge graph, Graph Data Science algorithm
//! wrappers, and the HTTP subgraph fetcher that backs the visualization.

pub mod algos;
pub mod client;
pub mod fetch;
pub mod ingest;
pub mod schema;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use fetch::{FetchError, SubgraphFetcher, VizEdge, VizGraph, VizNode};
pub use ingest::{run_full_ingest, IngestPaths, IngestResult};
