//! Neo4j schema initialization (uniqueness constraints).

use anyhow::Result;
use neo4rs::Query;
use tracing::info;

use crate::GraphClient;

/// Cypher statements for schema initialization.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE CONSTRAINT project_id IF NOT EXISTS FOR (p:Project) REQUIRE p.id IS UNIQUE",
    "CREATE CONSTRAINT deliverable_rcn IF NOT EXISTS FOR (d:Deliverable) REQUIRE d.rcn IS UNIQUE",
    "CREATE CONSTRAINT person_name IF NOT EXISTS FOR (p:Person) REQUIRE p.name IS UNIQUE",
    "CREATE CONSTRAINT organization_name IF NOT EXISTS FOR (o:Organization) REQUIRE o.name IS UNIQUE",
    "CREATE CONSTRAINT keyphrase_name IF NOT EXISTS FOR (k:Keyphrase) REQUIRE k.name IS UNIQUE",
];

/// Initialize the graph schema with uniqueness constraints.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> Result<()> {
    info!("Initializing graph schema...");

    for statement in SCHEMA_STATEMENTS {
        client.execute(Query::new(statement.to_string())).await?;
    }

    info!(
        "Graph schema initialized ({} statements)",
        SCHEMA_STATEMENTS.len()
    );
    Ok(())
}
