//! CSV ingestion command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use kgviz_graph::{ingest, schema, GraphClient, GraphConfig, IngestPaths};

#[derive(Args)]
pub struct LoadArgs {
    /// Projects CSV (';'-separated)
    #[arg(long)]
    pub projects: Option<PathBuf>,

    /// Project keyphrases CSV (','-separated)
    #[arg(long)]
    pub project_keyphrases: Option<PathBuf>,

    /// Deliverables CSV (';'-separated)
    #[arg(long)]
    pub deliverables: Option<PathBuf>,

    /// Persons CSV (','-separated), joined with deliverables by rcn
    #[arg(long)]
    pub persons: Option<PathBuf>,

    /// Deliverable keyphrases CSV (','-separated)
    #[arg(long)]
    pub deliverable_keyphrases: Option<PathBuf>,
}

pub async fn execute(args: LoadArgs, config: &GraphConfig) -> Result<()> {
    let paths = IngestPaths {
        projects: args.projects,
        project_keyphrases: args.project_keyphrases,
        deliverables: args.deliverables,
        persons: args.persons,
        deliverable_keyphrases: args.deliverable_keyphrases,
    };

    if paths.projects.is_none()
        && paths.project_keyphrases.is_none()
        && paths.deliverables.is_none()
        && paths.deliverable_keyphrases.is_none()
    {
        anyhow::bail!("Nothing to load. Pass at least one CSV path (see 'kgviz load --help').");
    }

    let client = GraphClient::connect(config).await?;

    // Constraints first, so MERGEs dedupe on the right keys.
    schema::initialize_schema(&client).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Loading CSV exports into the graph...");

    let result = ingest::run_full_ingest(&client, &paths).await?;

    spinner.finish_and_clear();

    println!("{}", "Load complete:".green().bold());
    println!("  Projects merged:       {}", result.projects);
    println!("  Organization links:    {}", result.organization_links);
    println!("  Keyphrase links:       {}", result.keyphrase_links);
    println!("  Deliverables merged:   {}", result.deliverables);
    println!("  Person links:          {}", result.person_links);
    if result.skipped_rows > 0 {
        println!(
            "  {}",
            format!("Skipped rows:          {}", result.skipped_rows).yellow()
        );
    }

    Ok(())
}
