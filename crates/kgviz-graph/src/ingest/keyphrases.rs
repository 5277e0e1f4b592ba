//! Keyphrase link ingestion.
//!
//! Each row links one target node (a project or a deliverable) to its
//! extracted keyphrases through `includes` edges.

use std::path::Path;

use anyhow::Result;
use neo4rs::Query;
use tracing::warn;

use super::{field, read_table, split_list, IngestResult};
use crate::GraphClient;

/// Which node label the keyphrase rows attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyphraseTarget {
    Project,
    Deliverable,
}

impl KeyphraseTarget {
    fn label(self) -> &'static str {
        match self {
            KeyphraseTarget::Project => "Project",
            KeyphraseTarget::Deliverable => "Deliverable",
        }
    }

    /// Column (and node property) holding the target id.
    fn id_field(self) -> &'static str {
        match self {
            KeyphraseTarget::Project => "id",
            KeyphraseTarget::Deliverable => "rcn",
        }
    }
}

/// Load a keyphrase links CSV (`,`-separated) into the graph.
pub async fn load_keyphrase_links(
    client: &GraphClient,
    path: &Path,
    target: KeyphraseTarget,
) -> Result<IngestResult> {
    let (headers, records) = read_table(path, b',')?;
    let mut result = IngestResult::default();

    // Both label and id property come from the enum, so the format! below
    // cannot receive user input.
    let link_query = format!(
        "MATCH (t:{} {{{}: $id}})
         UNWIND $keys AS key
         MERGE (k:Keyphrase {{name: key}})
         MERGE (t)-[:includes]->(k)",
        target.label(),
        target.id_field()
    );

    for record in &records {
        let Some(id) = field(&headers, record, target.id_field())
            .and_then(|v| v.parse::<i64>().ok())
        else {
            warn!(
                file = %path.display(),
                target = target.label(),
                "Skipping keyphrase row without a numeric target id"
            );
            result.skipped_rows += 1;
            continue;
        };

        let keys = field(&headers, record, "keyphrases")
            .map(|v| split_list(&v))
            .unwrap_or_default();
        if keys.is_empty() {
            result.skipped_rows += 1;
            continue;
        }

        let query = Query::new(link_query.clone())
            .param("id", id)
            .param("keys", keys.clone());

        client.execute(query).await?;
        result.keyphrase_links += keys.len();
    }

    Ok(result)
}
