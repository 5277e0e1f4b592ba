//! Project CSV ingestion.
//!
//! Merges (:Project) nodes with their funding fields and attaches the
//! participating organizations, including the coordinator.

use std::path::Path;

use anyhow::Result;
use neo4rs::Query;
use tracing::{debug, warn};

use super::{field, parse_amount, read_table, split_list, IngestResult};
use crate::GraphClient;

/// Load the projects CSV (`;`-separated) into the graph.
pub async fn load_projects(client: &GraphClient, path: &Path) -> Result<IngestResult> {
    let (headers, records) = read_table(path, b';')?;
    let mut result = IngestResult::default();

    for record in &records {
        let Some(id) = field(&headers, record, "id").and_then(|v| v.parse::<i64>().ok()) else {
            warn!(file = %path.display(), "Skipping project row without a numeric id");
            result.skipped_rows += 1;
            continue;
        };

        let text = |name: &str| field(&headers, record, name).unwrap_or_default();
        let amount = |name: &str| {
            field(&headers, record, name)
                .and_then(|v| parse_amount(&v))
                .unwrap_or(0.0)
        };

        let query = Query::new(
            "MERGE (p:Project {id: $id})
             SET p.acronym = $acronym,
                 p.call = $call,
                 p.status = $status,
                 p.programme = $programme,
                 p.topics = $topics,
                 p.startDate = $start_date,
                 p.endDate = $end_date,
                 p.projectUrl = $project_url,
                 p.totalCost = $total_cost,
                 p.ecMaxContribution = $ec_max_contribution,
                 p.fundingScheme = $funding_scheme"
                .to_string(),
        )
        .param("id", id)
        .param("acronym", text("acronym"))
        .param("call", text("call"))
        .param("status", text("status"))
        .param("programme", text("programme"))
        .param("topics", text("topics"))
        .param("start_date", text("startDate"))
        .param("end_date", text("endDate"))
        .param("project_url", text("projectUrl"))
        .param("total_cost", amount("totalCost"))
        .param("ec_max_contribution", amount("ecMaxContribution"))
        .param("funding_scheme", text("fundingScheme"));

        client.execute(query).await?;
        result.projects += 1;

        // Participants and the coordinator become Organization nodes.
        let participants = field(&headers, record, "participants")
            .map(|v| split_list(&v))
            .unwrap_or_default();

        if !participants.is_empty() {
            let participants_query = Query::new(
                "MATCH (p:Project {id: $id})
                 UNWIND $participants AS name
                 MERGE (o:Organization {name: name})
                 MERGE (o)-[:participates_in]->(p)"
                    .to_string(),
            )
            .param("id", id)
            .param("participants", participants.clone());

            client.execute(participants_query).await?;
            result.organization_links += participants.len();
        }

        if let Some(coordinator) = field(&headers, record, "coordinator") {
            let coordinator_query = Query::new(
                "MATCH (p:Project {id: $id})
                 MERGE (c:Organization {name: $coordinator})
                 MERGE (c)-[:participates_in]->(p)
                 MERGE (c)-[:coordinates]->(p)"
                    .to_string(),
            )
            .param("id", id)
            .param("coordinator", coordinator);

            client.execute(coordinator_query).await?;
            result.organization_links += 1;
        }

        debug!(project_id = id, "Merged project");
    }

    Ok(result)
}
