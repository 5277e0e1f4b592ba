//! Analysis command: similarity graph, pagerank, community detection.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use kgviz_graph::{algos, GraphClient, GraphConfig};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Skip rebuilding the is_similar graph
    #[arg(long)]
    pub skip_similarity: bool,

    /// Skip the pagerank/community pass
    #[arg(long)]
    pub skip_partition: bool,
}

pub async fn execute(args: AnalyzeArgs, config: &GraphConfig) -> Result<()> {
    let client = GraphClient::connect(config).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    if !args.skip_similarity {
        spinner.set_message("Rebuilding similarity graph...");
        algos::create_similarity_graph(&client).await?;
    }

    if !args.skip_partition {
        spinner.set_message("Running pagerank and community detection...");
        algos::run_initial_algorithms(&client).await?;
    }

    spinner.finish_and_clear();
    println!("{}", "Analysis complete.".green().bold());
    println!(
        "  {}",
        "Node sizes (pagerank), groups (community) and edge scores are ready for the view."
            .dimmed()
    );

    Ok(())
}
