//! CSV to Neo4j ingestion pipeline.
//!
//! Reads the prepared CSV exports (projects, keyphrase links, deliverables,
//! persons) and merges them into the knowledge graph. All writes are
//! parameterized MERGEs, so re-running an ingest is idempotent and CSV
//! values never get spliced into query text.

pub mod deliverables;
pub mod keyphrases;
pub mod projects;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::StringRecord;
use tracing::{info, warn};

use crate::GraphClient;

use self::keyphrases::KeyphraseTarget;

/// CSV inputs of a full ingest. Absent files are skipped.
#[derive(Debug, Clone, Default)]
pub struct IngestPaths {
    pub projects: Option<PathBuf>,
    pub project_keyphrases: Option<PathBuf>,
    pub deliverables: Option<PathBuf>,
    pub persons: Option<PathBuf>,
    pub deliverable_keyphrases: Option<PathBuf>,
}

/// Counters of a completed ingest.
#[derive(Debug, Clone, Default)]
pub struct IngestResult {
    pub projects: usize,
    pub organization_links: usize,
    pub keyphrase_links: usize,
    pub deliverables: usize,
    pub person_links: usize,
    pub skipped_rows: usize,
}

impl IngestResult {
    fn merge(&mut self, other: &IngestResult) {
        self.projects += other.projects;
        self.organization_links += other.organization_links;
        self.keyphrase_links += other.keyphrase_links;
        self.deliverables += other.deliverables;
        self.person_links += other.person_links;
        self.skipped_rows += other.skipped_rows;
    }
}

/// Run a full ingest in dependency order: project nodes first, then the
/// edges that attach to them.
pub async fn run_full_ingest(client: &GraphClient, paths: &IngestPaths) -> Result<IngestResult> {
    let mut total = IngestResult::default();

    if let Some(path) = &paths.projects {
        let result = projects::load_projects(client, path)
            .await
            .context("Failed to load projects")?;
        info!(
            projects = result.projects,
            organization_links = result.organization_links,
            "Projects loaded"
        );
        total.merge(&result);
    }

    if let Some(path) = &paths.project_keyphrases {
        let result = keyphrases::load_keyphrase_links(client, path, KeyphraseTarget::Project)
            .await
            .context("Failed to load project keyphrases")?;
        info!(links = result.keyphrase_links, "Project keyphrases loaded");
        total.merge(&result);
    }

    if let Some(path) = &paths.deliverables {
        let result =
            deliverables::load_deliverables(client, path, paths.persons.as_deref())
                .await
                .context("Failed to load deliverables")?;
        info!(
            deliverables = result.deliverables,
            person_links = result.person_links,
            "Deliverables loaded"
        );
        total.merge(&result);
    }

    if let Some(path) = &paths.deliverable_keyphrases {
        let result = keyphrases::load_keyphrase_links(client, path, KeyphraseTarget::Deliverable)
            .await
            .context("Failed to load deliverable keyphrases")?;
        info!(
            links = result.keyphrase_links,
            "Deliverable keyphrases loaded"
        );
        total.merge(&result);
    }

    info!(
        projects = total.projects,
        deliverables = total.deliverables,
        keyphrase_links = total.keyphrase_links,
        skipped = total.skipped_rows,
        "Ingest complete"
    );

    Ok(total)
}

/// Read a whole CSV file, skipping malformed records with a warning.
/// Returns the headers and the surviving records.
pub(crate) fn read_table(
    path: &Path,
    delimiter: u8,
) -> Result<(StringRecord, Vec<StringRecord>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV headers: {}", path.display()))?
        .clone();

    let mut records = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => warn!(file = %path.display(), "Skipping malformed CSV record: {}", e),
        }
    }

    Ok((headers, records))
}

/// Get a field by header name (case-insensitive), trimmed; `None` when the
/// column is absent or the value is empty.
pub(crate) fn field(
    headers: &StringRecord,
    record: &StringRecord,
    name: &str,
) -> Option<String> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .and_then(|i| record.get(i))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a `;`-separated cell into its non-empty trimmed items.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Parse a monetary amount that may use a decimal comma.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[&str]) -> StringRecord {
        StringRecord::from(values.to_vec())
    }

    #[test]
    fn test_field_is_header_addressed_and_trimmed() {
        let headers = record(&["id", "Acronym", "totalCost"]);
        let row = record(&["101", "  GRAPHX ", ""]);

        assert_eq!(field(&headers, &row, "acronym").as_deref(), Some("GRAPHX"));
        assert_eq!(field(&headers, &row, "id").as_deref(), Some("101"));
        assert_eq!(field(&headers, &row, "totalCost"), None);
        assert_eq!(field(&headers, &row, "missing"), None);
    }

    #[test]
    fn test_split_list_drops_empty_items() {
        assert_eq!(
            split_list("ACME;  Foo Labs ;;Bar"),
            vec!["ACME", "Foo Labs", "Bar"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_parse_amount_accepts_decimal_comma() {
        assert_eq!(parse_amount("1997978,5"), Some(1997978.5));
        assert_eq!(parse_amount(" 250000 "), Some(250000.0));
        assert_eq!(parse_amount("n/a"), None);
    }
}
