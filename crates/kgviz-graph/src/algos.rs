//! Graph Data Science algorithm wrappers.
//!
//! The analysis pass prepares the properties the visualization encodes:
//! `pagerank` for node size, `community` for grouping, and the
//! `is_similar` relationships with their `score` for edge thickness.
//! Algorithms run over anonymous projections built here; label and
//! relationship names come from compile-time constants, never from user
//! input.

use anyhow::Result;
use neo4rs::Query;
use tracing::info;

use crate::GraphClient;

const PAGERANK_MAX_ITERATIONS: u32 = 20;
const PAGERANK_DAMPING_FACTOR: f64 = 0.85;
const LOUVAIN_MAX_LEVELS: u32 = 10;
const LOUVAIN_MAX_ITERATIONS: u32 = 10;
const SIMILARITY_CUTOFF: f64 = 0.23;
const SIMILARITY_TOP_K: u32 = 1;

/// Relationship orientation inside a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Natural,
    Undirected,
}

impl Orientation {
    fn as_str(self) -> &'static str {
        match self {
            Orientation::Natural => "NATURAL",
            Orientation::Undirected => "UNDIRECTED",
        }
    }
}

/// Anonymous graph projection: the node labels and relationship types an
/// algorithm runs over.
#[derive(Debug, Clone)]
pub struct GraphProjection {
    nodes: Vec<String>,
    relationships: Vec<(String, Orientation)>,
}

impl GraphProjection {
    pub fn new(labels: &[&str]) -> Self {
        Self {
            nodes: labels.iter().map(|l| l.to_string()).collect(),
            relationships: Vec::new(),
        }
    }

    pub fn rel(mut self, rel_type: &str, orientation: Orientation) -> Self {
        self.relationships.push((rel_type.to_string(), orientation));
        self
    }

    fn node_projection(&self) -> String {
        let labels: Vec<String> = self.nodes.iter().map(|l| format!("\"{}\"", l)).collect();
        format!("[{}]", labels.join(", "))
    }

    fn relationship_projection(&self) -> String {
        let rels: Vec<String> = self
            .relationships
            .iter()
            .map(|(rel, orientation)| {
                format!(
                    "{}: {{type: \"{}\", orientation: \"{}\"}}",
                    rel,
                    rel,
                    orientation.as_str()
                )
            })
            .collect();
        format!("{{{}}}", rels.join(", "))
    }

    /// The shared prefix of every anonymous algorithm call.
    fn setup_prefix(&self) -> String {
        format!(
            "nodeProjection: {}, relationshipProjection: {}",
            self.node_projection(),
            self.relationship_projection()
        )
    }
}

fn pagerank_call(projection: &GraphProjection, write_property: &str) -> String {
    format!(
        "CALL gds.pageRank.write({{{}, writeProperty: \"{}\", maxIterations: {}, dampingFactor: {}}})",
        projection.setup_prefix(),
        write_property,
        PAGERANK_MAX_ITERATIONS,
        PAGERANK_DAMPING_FACTOR
    )
}

fn louvain_call(projection: &GraphProjection, write_property: &str) -> String {
    format!(
        "CALL gds.louvain.write({{{}, writeProperty: \"{}\", maxLevels: {}, maxIterations: {}}})",
        projection.setup_prefix(),
        write_property,
        LOUVAIN_MAX_LEVELS,
        LOUVAIN_MAX_ITERATIONS
    )
}

fn node_similarity_call(
    projection: &GraphProjection,
    write_property: &str,
    write_relationship: &str,
) -> String {
    format!(
        "CALL gds.nodeSimilarity.write({{{}, writeProperty: \"{}\", writeRelationshipType: \"{}\", similarityCutoff: {}, topK: {}}})",
        projection.setup_prefix(),
        write_property,
        write_relationship,
        SIMILARITY_CUTOFF,
        SIMILARITY_TOP_K
    )
}

/// Write pagerank scores to `write_property` on the projected nodes.
pub async fn write_pagerank(
    client: &GraphClient,
    projection: &GraphProjection,
    write_property: &str,
) -> Result<()> {
    client
        .execute(Query::new(pagerank_call(projection, write_property)))
        .await
}

/// Write louvain community ids to `write_property` on the projected nodes.
pub async fn write_louvain(
    client: &GraphClient,
    projection: &GraphProjection,
    write_property: &str,
) -> Result<()> {
    client
        .execute(Query::new(louvain_call(projection, write_property)))
        .await
}

/// Write jaccard node-similarity edges of type `write_relationship` with
/// the similarity stored in `write_property`.
pub async fn write_node_similarity(
    client: &GraphClient,
    projection: &GraphProjection,
    write_property: &str,
    write_relationship: &str,
) -> Result<()> {
    client
        .execute(Query::new(node_similarity_call(
            projection,
            write_property,
            write_relationship,
        )))
        .await
}

/// Rebuild the `is_similar` graph from scratch.
///
/// Organizations are compared through their projects' keyphrases, persons
/// through the deliverables they write.
pub async fn create_similarity_graph(client: &GraphClient) -> Result<()> {
    info!("Rebuilding similarity graph");

    // Remove similarity edges from previous runs.
    client
        .execute(Query::new(
            "MATCH ()-[r:is_similar]->() DELETE r".to_string(),
        ))
        .await?;

    let organizations = GraphProjection::new(&["Organization", "Project", "Keyphrase"])
        .rel("participates_in", Orientation::Natural)
        .rel("includes", Orientation::Natural);
    write_node_similarity(client, &organizations, "score", "is_similar").await?;

    let persons = GraphProjection::new(&["Person", "Deliverable", "Project", "Keyphrase"])
        .rel("writes", Orientation::Natural)
        .rel("belongs", Orientation::Natural)
        .rel("includes", Orientation::Natural);
    write_node_similarity(client, &persons, "score", "is_similar").await?;

    Ok(())
}

/// Run the centrality and community detection pass the visualization
/// depends on: pagerank for sizing, louvain communities for grouping.
pub async fn run_initial_algorithms(client: &GraphClient) -> Result<()> {
    info!("Running pagerank and community detection");

    let project_keyphrases = GraphProjection::new(&["Project", "Keyphrase"])
        .rel("includes", Orientation::Undirected);
    write_pagerank(client, &project_keyphrases, "pagerank").await?;

    for label in ["Project", "Organization", "Deliverable", "Person"] {
        let projection =
            GraphProjection::new(&[label]).rel("is_similar", Orientation::Natural);
        write_louvain(client, &projection, "community").await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagerank_call_shape() {
        let projection = GraphProjection::new(&["Project", "Keyphrase"])
            .rel("includes", Orientation::Undirected);

        assert_eq!(
            pagerank_call(&projection, "pagerank"),
            "CALL gds.pageRank.write({nodeProjection: [\"Project\", \"Keyphrase\"], \
             relationshipProjection: {includes: {type: \"includes\", orientation: \"UNDIRECTED\"}}, \
             writeProperty: \"pagerank\", maxIterations: 20, dampingFactor: 0.85})"
        );
    }

    #[test]
    fn test_louvain_call_shape() {
        let projection = GraphProjection::new(&["Project"]).rel("is_similar", Orientation::Natural);

        assert_eq!(
            louvain_call(&projection, "community"),
            "CALL gds.louvain.write({nodeProjection: [\"Project\"], \
             relationshipProjection: {is_similar: {type: \"is_similar\", orientation: \"NATURAL\"}}, \
             writeProperty: \"community\", maxLevels: 10, maxIterations: 10})"
        );
    }

    #[test]
    fn test_node_similarity_call_shape() {
        let projection = GraphProjection::new(&["Organization", "Project", "Keyphrase"])
            .rel("participates_in", Orientation::Natural)
            .rel("includes", Orientation::Natural);

        assert_eq!(
            node_similarity_call(&projection, "score", "is_similar"),
            "CALL gds.nodeSimilarity.write({nodeProjection: [\"Organization\", \"Project\", \"Keyphrase\"], \
             relationshipProjection: {participates_in: {type: \"participates_in\", orientation: \"NATURAL\"}, \
             includes: {type: \"includes\", orientation: \"NATURAL\"}}, \
             writeProperty: \"score\", writeRelationshipType: \"is_similar\", \
             similarityCutoff: 0.23, topK: 1})"
        );
    }
}
