//! Deliverable CSV ingestion.
//!
//! Merges (:Deliverable) nodes, attaches them to their project, and links
//! the authoring persons extracted into the companion persons CSV. The two
//! files are joined in memory on the deliverable `rcn`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use neo4rs::Query;
use tracing::{debug, warn};

use super::{field, read_table, split_list, IngestResult};
use crate::GraphClient;

/// Load the deliverables CSV (`;`-separated), optionally joined with the
/// persons CSV (`,`-separated) keyed by `rcn`.
pub async fn load_deliverables(
    client: &GraphClient,
    deliverables_path: &Path,
    persons_path: Option<&Path>,
) -> Result<IngestResult> {
    let persons_by_rcn = match persons_path {
        Some(path) => load_person_index(path)?,
        None => HashMap::new(),
    };

    let (headers, records) = read_table(deliverables_path, b';')?;
    let mut result = IngestResult::default();

    for record in &records {
        let Some(rcn) = field(&headers, record, "rcn").and_then(|v| v.parse::<i64>().ok())
        else {
            warn!(
                file = %deliverables_path.display(),
                "Skipping deliverable row without a numeric rcn"
            );
            result.skipped_rows += 1;
            continue;
        };

        let text = |name: &str| field(&headers, record, name).unwrap_or_default();
        let project_id = field(&headers, record, "projectID").and_then(|v| v.parse::<i64>().ok());

        let query = Query::new(
            "MERGE (d:Deliverable {rcn: $rcn})
             SET d.title = $title,
                 d.projectAcronym = $project_acronym,
                 d.programme = $programme,
                 d.deliverableType = $deliverable_type,
                 d.url = $url"
                .to_string(),
        )
        .param("rcn", rcn)
        .param("title", text("title"))
        .param("project_acronym", text("projectAcronym"))
        .param("programme", text("programme"))
        .param("deliverable_type", text("deliverableType"))
        .param("url", text("url"));

        client.execute(query).await?;
        result.deliverables += 1;

        if let Some(project_id) = project_id {
            let belongs_query = Query::new(
                "MATCH (d:Deliverable {rcn: $rcn}), (p:Project {id: $project_id})
                 MERGE (d)-[:belongs]->(p)"
                    .to_string(),
            )
            .param("rcn", rcn)
            .param("project_id", project_id);

            client.execute(belongs_query).await?;
        }

        if let Some(persons) = persons_by_rcn.get(&rcn) {
            let persons_query = Query::new(
                "MATCH (d:Deliverable {rcn: $rcn})
                 UNWIND $persons AS person
                 MERGE (a:Person {name: person})
                 MERGE (a)-[:writes]->(d)"
                    .to_string(),
            )
            .param("rcn", rcn)
            .param("persons", persons.clone());

            client.execute(persons_query).await?;
            result.person_links += persons.len();
        }

        debug!(rcn, "Merged deliverable");
    }

    Ok(result)
}

/// Index the persons CSV by deliverable rcn.
fn load_person_index(path: &Path) -> Result<HashMap<i64, Vec<String>>> {
    let (headers, records) = read_table(path, b',')?;
    let mut index: HashMap<i64, Vec<String>> = HashMap::new();

    for record in &records {
        let Some(rcn) = field(&headers, record, "rcn").and_then(|v| v.parse::<i64>().ok())
        else {
            continue;
        };
        let persons = field(&headers, record, "persons")
            .map(|v| split_list(&v))
            .unwrap_or_default();
        if !persons.is_empty() {
            index.entry(rcn).or_default().extend(persons);
        }
    }

    Ok(index)
}
